//! Country and subdivision reference data.
//!
//! Subdivisions cover every ISO 3166-2 entry, loaded from the bundled
//! `data/iso_3166_2.json` (generated from the Debian `iso-codes` package).

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Reference data used to resolve address components to codes.
pub trait RegionRepository: Send + Sync {
    /// `(code, name)` pairs of every known country.
    fn countries(&self) -> Vec<(&str, &str)>;

    /// `(code, name)` pairs of a country's subdivisions; empty when the
    /// country has none.
    fn subdivisions(&self, country_code: &str) -> Vec<(&str, &str)>;

    /// Whether addresses in the country must name a subdivision.
    fn requires_subdivision(&self, country_code: &str) -> bool;

    /// Check the postal code format for a country and optional subdivision.
    ///
    /// Countries without a known format accept any postal code.
    fn is_valid_postal_code(
        &self,
        country_code: &str,
        subdivision_code: Option<&str>,
        postal_code: &str,
    ) -> bool;

    /// Resolve a country name or code, ignoring case.
    fn country_code(&self, country: &str) -> Option<String> {
        let country = country.to_lowercase();
        self.countries()
            .into_iter()
            .find(|(code, name)| code.to_lowercase() == country || name.to_lowercase() == country)
            .map(|(code, _)| code.to_string())
    }

    /// Resolve a subdivision name or code within a country, ignoring case.
    fn subdivision_code(&self, country_code: &str, area: &str) -> Option<String> {
        let area = area.to_lowercase();
        self.subdivisions(country_code)
            .into_iter()
            .find(|(code, name)| code.to_lowercase() == area || name.to_lowercase() == area)
            .map(|(code, _)| code.to_string())
    }
}

/// Built-in ISO 3166 reference data.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRegionRepository;

impl StaticRegionRepository {
    pub fn new() -> Self {
        Self
    }
}

impl RegionRepository for StaticRegionRepository {
    fn countries(&self) -> Vec<(&str, &str)> {
        COUNTRIES.to_vec()
    }

    fn subdivisions(&self, country_code: &str) -> Vec<(&str, &str)> {
        SUBDIVISIONS
            .get(&country_code.to_uppercase())
            .map(|entries| {
                entries
                    .iter()
                    .map(|(code, name)| (code.as_str(), name.as_str()))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn requires_subdivision(&self, country_code: &str) -> bool {
        matches!(country_code, "US" | "CA")
    }

    fn is_valid_postal_code(
        &self,
        country_code: &str,
        subdivision_code: Option<&str>,
        postal_code: &str,
    ) -> bool {
        if self.requires_subdivision(country_code) && subdivision_code.is_none() {
            return false;
        }

        let postal_code = postal_code.trim().to_uppercase();
        let Some(pattern) = POSTAL_PATTERNS.get(country_code) else {
            return true;
        };
        if !pattern.is_match(&postal_code) {
            return false;
        }

        match (country_code, subdivision_code) {
            ("CA", Some(province)) => CA_POSTAL_PREFIXES
                .iter()
                .find(|(code, _)| *code == province)
                .map_or(true, |(_, prefixes)| {
                    postal_code.starts_with(|c: char| prefixes.contains(c))
                }),
            _ => true,
        }
    }
}

/// ISO 3166-2 subdivisions keyed by country code, codes without the country prefix.
static SUBDIVISIONS: Lazy<HashMap<String, Vec<(String, String)>>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../data/iso_3166_2.json"))
        .expect("Failed to parse bundled subdivision data")
});

static POSTAL_PATTERNS: Lazy<HashMap<&'static str, Regex>> = Lazy::new(|| {
    [
        ("US", r"\d{5}(?:[ -]\d{4})?"),
        ("CA", r"[ABCEGHJ-NPRSTVXY]\d[ABCEGHJ-NPRSTV-Z] ?\d[ABCEGHJ-NPRSTV-Z]\d"),
        ("GB", r"GIR ?0AA|[A-PR-UWYZ][A-HK-Y]?\d[A-Z\d]? ?\d[ABD-HJLNP-UW-Z]{2}"),
        ("IE", r"[\dA-Z]{3} ?[\dA-Z]{4}"),
        ("DE", r"\d{5}"),
        ("FR", r"\d{2} ?\d{3}"),
        ("ES", r"\d{5}"),
        ("IT", r"\d{5}"),
        ("NL", r"\d{4} ?[A-Z]{2}"),
        ("BE", r"\d{4}"),
        ("CH", r"\d{4}"),
        ("AT", r"\d{4}"),
        ("DK", r"\d{4}"),
        ("NO", r"\d{4}"),
        ("SE", r"\d{3} ?\d{2}"),
        ("FI", r"\d{5}"),
        ("PL", r"\d{2}-\d{3}"),
        ("PT", r"\d{4}-\d{3}"),
        ("AU", r"\d{4}"),
        ("NZ", r"\d{4}"),
        ("JP", r"\d{3}-?\d{4}"),
        ("KR", r"\d{5}"),
        ("CN", r"\d{6}"),
        ("IN", r"\d{6}"),
        ("SG", r"\d{6}"),
        ("RU", r"\d{6}"),
        ("BR", r"\d{5}-?\d{3}"),
        ("MX", r"\d{5}"),
        ("ZA", r"\d{4}"),
    ]
    .into_iter()
    .map(|(code, pattern)| {
        let anchored = format!("^(?:{})$", pattern);
        (
            code,
            Regex::new(&anchored).expect("Failed to compile postal code pattern"),
        )
    })
    .collect()
});

/// First letters a Canadian province's postal codes may start with.
static CA_POSTAL_PREFIXES: &[(&str, &str)] = &[
    ("AB", "T"),
    ("BC", "V"),
    ("MB", "R"),
    ("NB", "E"),
    ("NL", "A"),
    ("NS", "B"),
    ("NT", "X"),
    ("NU", "X"),
    ("ON", "KLMNP"),
    ("PE", "C"),
    ("QC", "GHJ"),
    ("SK", "S"),
    ("YT", "Y"),
];

static COUNTRIES: &[(&str, &str)] = &[
    ("AF", "Afghanistan"),
    ("AX", "Åland Islands"),
    ("AL", "Albania"),
    ("DZ", "Algeria"),
    ("AS", "American Samoa"),
    ("AD", "Andorra"),
    ("AO", "Angola"),
    ("AI", "Anguilla"),
    ("AQ", "Antarctica"),
    ("AG", "Antigua & Barbuda"),
    ("AR", "Argentina"),
    ("AM", "Armenia"),
    ("AW", "Aruba"),
    ("AC", "Ascension Island"),
    ("AU", "Australia"),
    ("AT", "Austria"),
    ("AZ", "Azerbaijan"),
    ("BS", "Bahamas"),
    ("BH", "Bahrain"),
    ("BD", "Bangladesh"),
    ("BB", "Barbados"),
    ("BY", "Belarus"),
    ("BE", "Belgium"),
    ("BZ", "Belize"),
    ("BJ", "Benin"),
    ("BM", "Bermuda"),
    ("BT", "Bhutan"),
    ("BO", "Bolivia"),
    ("BA", "Bosnia & Herzegovina"),
    ("BW", "Botswana"),
    ("BV", "Bouvet Island"),
    ("BR", "Brazil"),
    ("IO", "British Indian Ocean Territory"),
    ("VG", "British Virgin Islands"),
    ("BN", "Brunei"),
    ("BG", "Bulgaria"),
    ("BF", "Burkina Faso"),
    ("BI", "Burundi"),
    ("KH", "Cambodia"),
    ("CM", "Cameroon"),
    ("CA", "Canada"),
    ("IC", "Canary Islands"),
    ("CV", "Cape Verde"),
    ("BQ", "Caribbean Netherlands"),
    ("KY", "Cayman Islands"),
    ("CF", "Central African Republic"),
    ("EA", "Ceuta & Melilla"),
    ("TD", "Chad"),
    ("CL", "Chile"),
    ("CN", "China"),
    ("CX", "Christmas Island"),
    ("CP", "Clipperton Island"),
    ("CC", "Cocos (Keeling) Islands"),
    ("CO", "Colombia"),
    ("KM", "Comoros"),
    ("CG", "Congo - Brazzaville"),
    ("CD", "Congo - Kinshasa"),
    ("CK", "Cook Islands"),
    ("CR", "Costa Rica"),
    ("CI", "Côte d’Ivoire"),
    ("HR", "Croatia"),
    ("CU", "Cuba"),
    ("CW", "Curaçao"),
    ("CY", "Cyprus"),
    ("CZ", "Czechia"),
    ("DK", "Denmark"),
    ("DG", "Diego Garcia"),
    ("DJ", "Djibouti"),
    ("DM", "Dominica"),
    ("DO", "Dominican Republic"),
    ("EC", "Ecuador"),
    ("EG", "Egypt"),
    ("SV", "El Salvador"),
    ("GQ", "Equatorial Guinea"),
    ("ER", "Eritrea"),
    ("EE", "Estonia"),
    ("SZ", "Eswatini"),
    ("ET", "Ethiopia"),
    ("FK", "Falkland Islands"),
    ("FO", "Faroe Islands"),
    ("FJ", "Fiji"),
    ("FI", "Finland"),
    ("FR", "France"),
    ("GF", "French Guiana"),
    ("PF", "French Polynesia"),
    ("TF", "French Southern Territories"),
    ("GA", "Gabon"),
    ("GM", "Gambia"),
    ("GE", "Georgia"),
    ("DE", "Germany"),
    ("GH", "Ghana"),
    ("GI", "Gibraltar"),
    ("GR", "Greece"),
    ("GL", "Greenland"),
    ("GD", "Grenada"),
    ("GP", "Guadeloupe"),
    ("GU", "Guam"),
    ("GT", "Guatemala"),
    ("GG", "Guernsey"),
    ("GN", "Guinea"),
    ("GW", "Guinea-Bissau"),
    ("GY", "Guyana"),
    ("HT", "Haiti"),
    ("HM", "Heard & McDonald Islands"),
    ("HN", "Honduras"),
    ("HK", "Hong Kong SAR China"),
    ("HU", "Hungary"),
    ("IS", "Iceland"),
    ("IN", "India"),
    ("ID", "Indonesia"),
    ("IR", "Iran"),
    ("IQ", "Iraq"),
    ("IE", "Ireland"),
    ("IM", "Isle of Man"),
    ("IL", "Israel"),
    ("IT", "Italy"),
    ("JM", "Jamaica"),
    ("JP", "Japan"),
    ("JE", "Jersey"),
    ("JO", "Jordan"),
    ("KZ", "Kazakhstan"),
    ("KE", "Kenya"),
    ("KI", "Kiribati"),
    ("XK", "Kosovo"),
    ("KW", "Kuwait"),
    ("KG", "Kyrgyzstan"),
    ("LA", "Laos"),
    ("LV", "Latvia"),
    ("LB", "Lebanon"),
    ("LS", "Lesotho"),
    ("LR", "Liberia"),
    ("LY", "Libya"),
    ("LI", "Liechtenstein"),
    ("LT", "Lithuania"),
    ("LU", "Luxembourg"),
    ("MO", "Macao SAR China"),
    ("MG", "Madagascar"),
    ("MW", "Malawi"),
    ("MY", "Malaysia"),
    ("MV", "Maldives"),
    ("ML", "Mali"),
    ("MT", "Malta"),
    ("MH", "Marshall Islands"),
    ("MQ", "Martinique"),
    ("MR", "Mauritania"),
    ("MU", "Mauritius"),
    ("YT", "Mayotte"),
    ("MX", "Mexico"),
    ("FM", "Micronesia"),
    ("MD", "Moldova"),
    ("MC", "Monaco"),
    ("MN", "Mongolia"),
    ("ME", "Montenegro"),
    ("MS", "Montserrat"),
    ("MA", "Morocco"),
    ("MZ", "Mozambique"),
    ("MM", "Myanmar (Burma)"),
    ("NA", "Namibia"),
    ("NR", "Nauru"),
    ("NP", "Nepal"),
    ("NL", "Netherlands"),
    ("NC", "New Caledonia"),
    ("NZ", "New Zealand"),
    ("NI", "Nicaragua"),
    ("NE", "Niger"),
    ("NG", "Nigeria"),
    ("NU", "Niue"),
    ("NF", "Norfolk Island"),
    ("KP", "North Korea"),
    ("MK", "North Macedonia"),
    ("MP", "Northern Mariana Islands"),
    ("NO", "Norway"),
    ("OM", "Oman"),
    ("PK", "Pakistan"),
    ("PW", "Palau"),
    ("PS", "Palestinian Territories"),
    ("PA", "Panama"),
    ("PG", "Papua New Guinea"),
    ("PY", "Paraguay"),
    ("PE", "Peru"),
    ("PH", "Philippines"),
    ("PN", "Pitcairn Islands"),
    ("PL", "Poland"),
    ("PT", "Portugal"),
    ("PR", "Puerto Rico"),
    ("QA", "Qatar"),
    ("RE", "Réunion"),
    ("RO", "Romania"),
    ("RU", "Russia"),
    ("RW", "Rwanda"),
    ("WS", "Samoa"),
    ("SM", "San Marino"),
    ("ST", "São Tomé & Príncipe"),
    ("SA", "Saudi Arabia"),
    ("SN", "Senegal"),
    ("RS", "Serbia"),
    ("SC", "Seychelles"),
    ("SL", "Sierra Leone"),
    ("SG", "Singapore"),
    ("SX", "Sint Maarten"),
    ("SK", "Slovakia"),
    ("SI", "Slovenia"),
    ("SB", "Solomon Islands"),
    ("SO", "Somalia"),
    ("ZA", "South Africa"),
    ("GS", "South Georgia & South Sandwich Islands"),
    ("KR", "South Korea"),
    ("SS", "South Sudan"),
    ("ES", "Spain"),
    ("LK", "Sri Lanka"),
    ("BL", "St. Barthélemy"),
    ("SH", "St. Helena"),
    ("KN", "St. Kitts & Nevis"),
    ("LC", "St. Lucia"),
    ("MF", "St. Martin"),
    ("PM", "St. Pierre & Miquelon"),
    ("VC", "St. Vincent & Grenadines"),
    ("SD", "Sudan"),
    ("SR", "Suriname"),
    ("SJ", "Svalbard & Jan Mayen"),
    ("SE", "Sweden"),
    ("CH", "Switzerland"),
    ("SY", "Syria"),
    ("TW", "Taiwan"),
    ("TJ", "Tajikistan"),
    ("TZ", "Tanzania"),
    ("TH", "Thailand"),
    ("TL", "Timor-Leste"),
    ("TG", "Togo"),
    ("TK", "Tokelau"),
    ("TO", "Tonga"),
    ("TT", "Trinidad & Tobago"),
    ("TA", "Tristan da Cunha"),
    ("TN", "Tunisia"),
    ("TR", "Türkiye"),
    ("TM", "Turkmenistan"),
    ("TC", "Turks & Caicos Islands"),
    ("TV", "Tuvalu"),
    ("UM", "U.S. Outlying Islands"),
    ("VI", "U.S. Virgin Islands"),
    ("UG", "Uganda"),
    ("UA", "Ukraine"),
    ("AE", "United Arab Emirates"),
    ("GB", "United Kingdom"),
    ("US", "United States"),
    ("UY", "Uruguay"),
    ("UZ", "Uzbekistan"),
    ("VU", "Vanuatu"),
    ("VA", "Vatican City"),
    ("VE", "Venezuela"),
    ("VN", "Vietnam"),
    ("WF", "Wallis & Futuna"),
    ("EH", "Western Sahara"),
    ("YE", "Yemen"),
    ("ZM", "Zambia"),
    ("ZW", "Zimbabwe"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_code_by_name_or_code() {
        let repo = StaticRegionRepository::new();
        assert_eq!(repo.country_code("canada").as_deref(), Some("CA"));
        assert_eq!(repo.country_code("United States").as_deref(), Some("US"));
        assert_eq!(repo.country_code("de").as_deref(), Some("DE"));
        assert_eq!(repo.country_code("Atlantis"), None);
    }

    #[test]
    fn test_subdivision_code() {
        let repo = StaticRegionRepository::new();
        assert_eq!(repo.subdivision_code("CA", "ontario").as_deref(), Some("ON"));
        assert_eq!(repo.subdivision_code("US", "ca").as_deref(), Some("CA"));
        assert_eq!(repo.subdivision_code("CA", "California"), None);
    }

    #[test]
    fn test_subdivisions_cover_all_countries() {
        let repo = StaticRegionRepository::new();
        assert_eq!(repo.subdivision_code("DE", "bayern").as_deref(), Some("BY"));
        assert_eq!(repo.subdivision_code("DE", "BY").as_deref(), Some("BY"));
        assert_eq!(repo.subdivision_code("MX", "Jalisco").as_deref(), Some("JAL"));
        assert_eq!(repo.subdivision_code("MX", "Ontario"), None);
        assert_eq!(repo.subdivision_code("DE", "Atlantis"), None);
        assert!(!repo.subdivisions("FR").is_empty());
        assert!(repo.subdivisions("VA").is_empty());
        assert_eq!(repo.subdivisions("US").len(), 57);
    }

    #[test]
    fn test_postal_codes() {
        let repo = StaticRegionRepository::new();
        assert!(repo.is_valid_postal_code("US", Some("CA"), "94103"));
        assert!(repo.is_valid_postal_code("US", Some("CA"), "94103-1234"));
        assert!(!repo.is_valid_postal_code("US", Some("CA"), "9410"));
        assert!(!repo.is_valid_postal_code("US", None, "94103"));

        assert!(repo.is_valid_postal_code("CA", Some("ON"), "M5V 3L9"));
        assert!(repo.is_valid_postal_code("CA", Some("ON"), "m5v3l9"));
        assert!(!repo.is_valid_postal_code("CA", Some("QC"), "M5V 3L9"));

        assert!(repo.is_valid_postal_code("GB", None, "SW1A 1AA"));
        assert!(repo.is_valid_postal_code("NL", None, "1012 AB"));
        assert!(!repo.is_valid_postal_code("DE", None, "1234"));
    }

    #[test]
    fn test_unknown_postal_format_passes() {
        let repo = StaticRegionRepository::new();
        assert!(repo.is_valid_postal_code("KE", None, "anything"));
    }
}
