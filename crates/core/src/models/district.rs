//! Districts and their legislative assembly constituencies (LACs)

use serde::{Deserialize, Serialize};

/// Administrative district
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum District {
    Kasaragod,
    Kannur,
    Wayanad,
    Kozhikode,
    Malappuram,
    Palakkad,
}

const KASARAGOD_LACS: &[&str] = &[
    "Manjeshwar (LAC No. 1)",
    "Kasaragod (LAC No. 2)",
    "Udma (LAC No. 3)",
    "Kanhangad (LAC No. 4)",
    "Thrikaripur (LAC No. 5)",
];

const KANNUR_LACS: &[&str] = &[
    "Payyannur (LAC No. 6)",
    "Kalliasseri (LAC No. 7)",
    "Taliparamba (LAC No. 8)",
    "Irikkur (LAC No. 9)",
    "Azhikode (LAC No. 10)",
    "Kannur (LAC No. 11)",
    "Dharmadam (LAC No. 12)",
    "Thalassery (LAC No. 13)",
    "Kuthuparamba (LAC No. 14)",
    "Mattannur (LAC No. 15)",
    "Peravoor (LAC No. 16)",
];

const WAYANAD_LACS: &[&str] = &[
    "Mananthavady (ST) (LAC No. 17)",
    "Sulthan Bathery (ST) (LAC No. 18)",
    "Kalpetta (LAC No. 19)",
];

const KOZHIKODE_LACS: &[&str] = &[
    "Vadakara (LAC No. 20)",
    "Kuttiadi (LAC No. 21)",
    "Nadapuram (LAC No. 22)",
    "Quilandy (LAC No. 23)",
    "Perambra (LAC No. 24)",
    "Balussery (SC) (LAC No. 25)",
    "Elathur (LAC No. 26)",
    "Kozhikode North (LAC No. 27)",
    "Kozhikode South (LAC No. 28)",
    "Beypore (LAC No. 29)",
    "Kunnamangalam (LAC No. 30)",
    "Koduvally (LAC No. 31)",
    "Thiruvambady (LAC No. 32)",
];

const MALAPPURAM_LACS: &[&str] = &[
    "Kondotty (LAC No. 33)",
    "Eranad (LAC No. 34)",
    "Nilambur (LAC No. 35)",
    "Wandoor (SC) (LAC No. 36)",
    "Manjeri (LAC No. 37)",
    "Perinthalmanna (LAC No. 38)",
    "Mankada (LAC No. 39)",
    "Malappuram (LAC No. 40)",
    "Vengara (LAC No. 41)",
    "Vallikkunnu (LAC No. 42)",
    "Tirurangadi (LAC No. 43)",
    "Tanur (LAC No. 44)",
    "Tirur (LAC No. 45)",
    "Kottakkal (LAC No. 46)",
    "Thavanur (LAC No. 47)",
    "Ponnani (LAC No. 48)",
];

const PALAKKAD_LACS: &[&str] = &[
    "Thrithala (LAC No. 49)",
    "Pattambi (LAC No. 50)",
    "Shornur (LAC No. 51)",
    "Ottapalam (LAC No. 52)",
    "Kongad (SC) (LAC No. 53)",
    "Mannarkkad (LAC No. 54)",
    "Malampuzha (LAC No. 55)",
    "Palakkad (LAC No. 56)",
    "Tarur (SC) (LAC No. 57)",
    "Chittur (LAC No. 58)",
    "Nenmara (LAC No. 59)",
    "Alathur (LAC No. 60)",
];

impl District {
    /// All districts in catalog order
    pub const ALL: [District; 6] = [
        District::Kasaragod,
        District::Kannur,
        District::Wayanad,
        District::Kozhikode,
        District::Malappuram,
        District::Palakkad,
    ];

    pub fn all() -> &'static [District] {
        &Self::ALL
    }

    pub fn name(self) -> &'static str {
        match self {
            District::Kasaragod => "Kasaragod",
            District::Kannur => "Kannur",
            District::Wayanad => "Wayanad",
            District::Kozhikode => "Kozhikode",
            District::Malappuram => "Malappuram",
            District::Palakkad => "Palakkad",
        }
    }

    /// Ordered LAC names belonging to this district
    pub fn lacs(self) -> &'static [&'static str] {
        match self {
            District::Kasaragod => KASARAGOD_LACS,
            District::Kannur => KANNUR_LACS,
            District::Wayanad => WAYANAD_LACS,
            District::Kozhikode => KOZHIKODE_LACS,
            District::Malappuram => MALAPPURAM_LACS,
            District::Palakkad => PALAKKAD_LACS,
        }
    }

    pub fn contains_lac(self, lac: &str) -> bool {
        self.lacs().contains(&lac)
    }

    /// Case-insensitive lookup by name
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }
}

/// Find the district that owns a LAC
pub fn district_of_lac(lac: &str) -> Option<District> {
    District::ALL.into_iter().find(|d| d.contains_lac(lac))
}

impl std::fmt::Display for District {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for District {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> crate::error::Result<Self> {
        Self::from_name(s)
            .ok_or_else(|| crate::error::Error::Validation(format!("Unknown district '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_district_has_lacs() {
        for district in District::all() {
            assert!(!district.lacs().is_empty(), "{} has no LACs", district);
        }
    }

    #[test]
    fn test_lacs_do_not_overlap() {
        let mut seen = HashSet::new();
        for district in District::all() {
            for lac in district.lacs() {
                assert!(seen.insert(*lac), "LAC {} listed twice", lac);
            }
        }
        assert_eq!(seen.len(), 60);
    }

    #[test]
    fn test_district_of_lac() {
        assert_eq!(
            district_of_lac("Thalassery (LAC No. 13)"),
            Some(District::Kannur)
        );
        assert_eq!(district_of_lac("Kalpetta (LAC No. 19)"), Some(District::Wayanad));
        assert_eq!(district_of_lac("Nowhere"), None);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(District::from_name("kannur"), Some(District::Kannur));
        assert_eq!("Palakkad".parse::<District>().unwrap(), District::Palakkad);
        assert!("Atlantis".parse::<District>().is_err());
    }
}
