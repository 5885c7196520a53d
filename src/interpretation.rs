//! Read-only number-to-text lookup for numerology results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::consts::NO_INTERPRETATION;
use crate::{CalendarDate, ConfigError, Error, NumerologyNumber, destiny_number, life_path_number};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    pub number:            NumerologyNumber,
    pub life_path_meaning: String,
    pub destiny_meaning:   String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Interpretation>", into = "Vec<Interpretation>")]
pub struct InterpretationTable {
    entries: BTreeMap<NumerologyNumber, Interpretation>,
}

/// Both numbers for a person together with their meanings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumerologyReading {
    pub life_path:         NumerologyNumber,
    pub destiny:           NumerologyNumber,
    pub life_path_meaning: String,
    pub destiny_meaning:   String,
}

impl InterpretationTable {
    /// # Errors
    /// Returns `ConfigError::InvalidTable` if a number appears twice.
    pub fn new(entries: Vec<Interpretation>) -> Result<Self, ConfigError> {
        let mut map = BTreeMap::new();
        for entry in entries {
            let number = entry.number;
            if map.insert(number, entry).is_some() {
                return Err(ConfigError::InvalidTable(format!(
                    "interpretation for {number} defined twice"
                )));
            }
        }
        Ok(Self { entries: map })
    }

    pub fn get(&self, number: NumerologyNumber) -> Option<&Interpretation> {
        self.entries.get(&number)
    }

    pub fn life_path_meaning(&self, number: NumerologyNumber) -> &str {
        self.get(number)
            .map_or(NO_INTERPRETATION, |i| i.life_path_meaning.as_str())
    }

    pub fn destiny_meaning(&self, number: NumerologyNumber) -> &str {
        self.get(number)
            .map_or(NO_INTERPRETATION, |i| i.destiny_meaning.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Computes both numbers and attaches their meanings.
    ///
    /// # Errors
    /// Returns `Error::InvalidInput` if the name has no Latin letters.
    pub fn reading(&self, name: &str, birth_date: CalendarDate) -> Result<NumerologyReading, Error> {
        let life_path = life_path_number(birth_date)?;
        let destiny = destiny_number(name)?;
        Ok(NumerologyReading {
            life_path,
            destiny,
            life_path_meaning: self.life_path_meaning(life_path).to_owned(),
            destiny_meaning: self.destiny_meaning(destiny).to_owned(),
        })
    }
}

impl TryFrom<Vec<Interpretation>> for InterpretationTable {
    type Error = ConfigError;

    fn try_from(entries: Vec<Interpretation>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<InterpretationTable> for Vec<Interpretation> {
    fn from(table: InterpretationTable) -> Self {
        table.entries.into_values().collect()
    }
}

const BUILTIN: [(u8, &str, &str); 12] = [
    (
        1,
        "You are a natural leader with strong independence and originality. You have the drive to achieve your goals and inspire others.",
        "Your destiny is to lead and innovate. You are meant to break new ground and inspire others through your unique vision.",
    ),
    (
        2,
        "You are naturally cooperative and diplomatic. You excel at bringing people together and creating harmony in relationships.",
        "Your destiny involves partnership and cooperation. You are meant to help others and create peaceful solutions.",
    ),
    (
        3,
        "You are creative and expressive with excellent communication skills. You inspire others through art, words, or performance.",
        "Your destiny is to communicate and create. You are meant to inspire others through your artistic and expressive talents.",
    ),
    (
        4,
        "You are practical, reliable, and hardworking. You build strong foundations and achieve success through persistence.",
        "Your destiny involves creating stability and order. You are meant to build lasting structures and systems.",
    ),
    (
        5,
        "You love freedom, adventure, and variety. You are curious about the world and enjoy exploring new experiences.",
        "Your destiny is to experience freedom and share adventures. You are meant to explore and teach others about the world.",
    ),
    (
        6,
        "You are nurturing, responsible, and family-oriented. You have a strong desire to help and care for others.",
        "Your destiny involves service and healing. You are meant to care for others and create harmonious communities.",
    ),
    (
        7,
        "You are analytical, spiritual, and introspective. You seek deeper meaning and understanding in all aspects of life.",
        "Your destiny is to seek wisdom and share knowledge. You are meant to be a teacher and spiritual guide.",
    ),
    (
        8,
        "You are ambitious, authoritative, and business-minded. You have strong leadership skills and material success potential.",
        "Your destiny involves material success and leadership. You are meant to achieve great things in the business world.",
    ),
    (
        9,
        "You are generous, humanitarian, and compassionate. You have a strong desire to help humanity and make the world better.",
        "Your destiny is to serve humanity. You are meant to be a humanitarian leader and inspire global positive change.",
    ),
    (
        11,
        "You are highly intuitive and spiritually aware. You have the potential to inspire others through your insights and vision.",
        "Your destiny is to be an inspirational leader. You are meant to enlighten others with your spiritual insights.",
    ),
    (
        22,
        "You are the master builder with the ability to turn dreams into reality. You can achieve great things on a large scale.",
        "Your destiny is to build something lasting and meaningful. You are meant to create significant positive change in the world.",
    ),
    (
        33,
        "You are the master teacher with exceptional healing and nurturing abilities. You inspire others through compassion and wisdom.",
        "Your destiny is to heal and teach. You are meant to guide others with unconditional love and spiritual wisdom.",
    ),
];

impl Default for InterpretationTable {
    fn default() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|&(number, life_path, destiny)| {
                let number = NumerologyNumber::new_unchecked(number);
                (
                    number,
                    Interpretation {
                        number,
                        life_path_meaning: life_path.to_owned(),
                        destiny_meaning: destiny.to_owned(),
                    },
                )
            })
            .collect();
        Self { entries }
    }
}
