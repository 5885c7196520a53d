//! Daily horoscope content keyed by sign.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, ConfigError, ZodiacSign};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHoroscope {
    pub sign:         ZodiacSign,
    pub description:  String,
    pub lucky_number: u8,
    pub lucky_color:  String,
    pub mood:         String,
}

/// A horoscope entry stamped with the day it is shown for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatedHoroscope<'a> {
    pub date:      CalendarDate,
    #[serde(flatten)]
    pub horoscope: &'a DailyHoroscope,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DailyHoroscope>", into = "Vec<DailyHoroscope>")]
pub struct HoroscopeTable {
    entries: BTreeMap<ZodiacSign, DailyHoroscope>,
}

impl HoroscopeTable {
    /// # Errors
    /// Returns `ConfigError::InvalidTable` if a sign appears twice.
    pub fn new(entries: Vec<DailyHoroscope>) -> Result<Self, ConfigError> {
        let mut map = BTreeMap::new();
        for entry in entries {
            let sign = entry.sign;
            if map.insert(sign, entry).is_some() {
                return Err(ConfigError::InvalidTable(format!(
                    "horoscope for {sign} defined twice"
                )));
            }
        }
        Ok(Self { entries: map })
    }

    pub fn get(&self, sign: ZodiacSign) -> Option<&DailyHoroscope> {
        self.entries.get(&sign)
    }

    pub fn for_date(&self, sign: ZodiacSign, date: CalendarDate) -> Option<DatedHoroscope<'_>> {
        self.get(sign).map(|horoscope| DatedHoroscope { date, horoscope })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<DailyHoroscope>> for HoroscopeTable {
    type Error = ConfigError;

    fn try_from(entries: Vec<DailyHoroscope>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<HoroscopeTable> for Vec<DailyHoroscope> {
    fn from(table: HoroscopeTable) -> Self {
        table.entries.into_values().collect()
    }
}

const BUILTIN: [(ZodiacSign, &str, u8, &str, &str); 12] = [
    (
        ZodiacSign::Aries,
        "Your fiery energy is particularly strong today. Take on new challenges with confidence, but remember to pace yourself. A conversation with a friend might reveal an unexpected opportunity.",
        7,
        "Red",
        "Energetic",
    ),
    (
        ZodiacSign::Taurus,
        "Stability and patience will serve you well today. Focus on practical matters and avoid rushing into decisions. Your determination will help you overcome any obstacles.",
        3,
        "Green",
        "Grounded",
    ),
    (
        ZodiacSign::Gemini,
        "Communication is your superpower today. Express your ideas clearly and listen to others with an open mind. Multiple opportunities may present themselves.",
        5,
        "Yellow",
        "Curious",
    ),
    (
        ZodiacSign::Cancer,
        "Trust your intuition today. Your emotional intelligence will guide you to make the right decisions. Spend quality time with loved ones.",
        2,
        "Silver",
        "Intuitive",
    ),
    (
        ZodiacSign::Leo,
        "Your natural charisma shines brightly today. Take center stage and share your talents with the world. Success is within reach if you stay confident.",
        8,
        "Gold",
        "Confident",
    ),
    (
        ZodiacSign::Virgo,
        "Attention to detail will pay off today. Organize your thoughts and priorities. A methodical approach will lead to significant progress.",
        6,
        "Navy Blue",
        "Analytical",
    ),
    (
        ZodiacSign::Libra,
        "Balance and harmony are your themes today. Seek fairness in all dealings and avoid making hasty judgments. Beauty surrounds you.",
        4,
        "Pink",
        "Balanced",
    ),
    (
        ZodiacSign::Scorpio,
        "Deep transformation is possible today. Embrace change and let go of what no longer serves you. Your intensity will attract positive outcomes.",
        9,
        "Maroon",
        "Transformative",
    ),
    (
        ZodiacSign::Sagittarius,
        "Adventure calls to you today. Expand your horizons through learning or travel. Your optimistic outlook will inspire others.",
        1,
        "Purple",
        "Adventurous",
    ),
    (
        ZodiacSign::Capricorn,
        "Your ambitious nature will drive you toward success today. Set clear goals and work steadily toward them. Recognition is coming your way.",
        10,
        "Brown",
        "Ambitious",
    ),
    (
        ZodiacSign::Aquarius,
        "Innovation and originality are highlighted today. Think outside the box and embrace your uniqueness. Technology may play a helpful role.",
        11,
        "Turquoise",
        "Innovative",
    ),
    (
        ZodiacSign::Pisces,
        "Your compassionate nature draws others to you today. Trust your dreams and creative instincts. Spiritual practices may bring clarity.",
        12,
        "Sea Green",
        "Compassionate",
    ),
];

impl Default for HoroscopeTable {
    fn default() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|&(sign, description, lucky_number, lucky_color, mood)| {
                (
                    sign,
                    DailyHoroscope {
                        sign,
                        description: description.to_owned(),
                        lucky_number,
                        lucky_color: lucky_color.to_owned(),
                        mood: mood.to_owned(),
                    },
                )
            })
            .collect();
        Self { entries }
    }
}
