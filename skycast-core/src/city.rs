use crate::Config;

/// A selectable city: human-readable name plus the provider's opaque
/// location code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub name: String,
    pub code: String,
}

/// The enumerated set of cities the widget can display.
///
/// Selection is always a member of this set; there is no free-text input.
/// The built-in set can be extended from the config file's `[cities]` table,
/// so adding a city needs no code change. Order is stable: built-ins first in
/// their fixed order, config extras after, sorted by name.
#[derive(Debug, Clone)]
pub struct CityBook {
    cities: Vec<City>,
}

const BUILTIN_CITIES: &[(&str, &str)] = &[
    ("上海", "WTX_CH101020400"),
    ("北京", "WTX_CH101010100"),
    ("广州", "WTX_CH101280101"),
    ("深圳", "WTX_CH101280601"),
    ("杭州", "WTX_CH101210101"),
];

impl CityBook {
    /// The built-in city set, without config extras.
    pub fn builtin() -> Self {
        let cities = BUILTIN_CITIES
            .iter()
            .map(|(name, code)| City { name: (*name).to_string(), code: (*code).to_string() })
            .collect();

        Self { cities }
    }

    /// Built-ins merged with the `[cities]` table from config.
    ///
    /// A config entry with a built-in name overrides that city's code;
    /// otherwise it is appended.
    pub fn from_config(config: &Config) -> Self {
        let mut book = Self::builtin();

        for (name, code) in &config.cities {
            match book.cities.iter_mut().find(|c| c.name == *name) {
                Some(existing) => existing.code = code.clone(),
                None => book.cities.push(City { name: name.clone(), code: code.clone() }),
            }
        }

        book
    }

    /// City names in display order, for populating the selection control.
    pub fn names(&self) -> Vec<&str> {
        self.cities.iter().map(|c| c.name.as_str()).collect()
    }

    /// Resolve a city name to its provider location code.
    pub fn code_for(&self, name: &str) -> Option<&str> {
        self.cities.iter().find(|c| c.name == name).map(|c| c.code.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.code_for(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}
