//! Static lookup tables: first-name abbreviations, nobility/status titles,
//! occupations, and the geographic/historical gazetteers.
//!
//! All keys are pre-normalized to lowercase. Abbreviation keys carry no
//! trailing period and compound keys use spaces, matching the normalization
//! the matcher applies before lookup. The tables are exposed both as
//! `pub const` slices and as owned structs (`NameTables`, `Gazetteer`) so
//! tests can inject substitutes.

use std::collections::{HashMap, HashSet};

// ── First-name abbreviations ───────────────────────────────────────

/// Simple (single-part) first-name abbreviations found in the catalogs.
/// Keys are lowercased with the trailing period stripped; single letters
/// cover the initial-by-initial fallback for compound names.
pub const SIMPLE_NAMES: &[(&str, &str)] = &[
    ("ad", "adam"),
    ("alex", "alexandre"),
    ("alph", "alphonse"),
    ("ant", "antoine"),
    ("arm", "armand"),
    ("aug", "auguste"),
    ("b", "baptiste"),
    ("ch", "charles"),
    ("cl", "claude"),
    ("edm", "edmond"),
    ("emm", "emmanuel"),
    ("ed", "edouard"),
    ("et", "etienne"),
    ("ét", "etienne"),
    ("f", "françois"),
    ("ferd", "ferdinand"),
    ("fr", "françois"),
    ("fréd", "frédéric"),
    ("g", "guillaume"),
    ("guill", "guillaume"),
    ("gab", "gabriel"),
    ("j", "jean"),
    ("jacq", "jacques"),
    ("jh", "joseph"),
    ("jos", "joseph"),
    ("l", "louis"),
    ("m", "marie"),
    ("nic", "nicolas"),
    ("p", "pierre"),
    ("ph", "philippe"),
    ("v", "victor"),
    ("vr", "victor"),
];

/// Compound first-name abbreviations. Queried before the initial-by-initial
/// fallback: a compound abbreviation gives context to its parts ("J.-B."
/// is Jean-Baptiste, not Jean + any B name). Keys are normalized the same
/// way the matcher normalizes its match: periods stripped, hyphens replaced
/// by spaces, lowercased.
pub const COMPOUND_NAMES: &[(&str, &str)] = &[
    ("f m", "françois marie"),
    ("j f", "jean françois"),
    ("j m", "jean marie"),
    ("j j", "jean jacques"),
    ("j l", "jean louis"),
    ("j b", "jean baptiste"),
    ("j p", "jean pierre"),
    ("j pierre", "jean pierre"),
    ("m madeleine", "marie madeleine"),
    ("p j", "pierre jean"),
    ("j sylvain", "jean sylvain"),
    ("l ph", "louis philippe"),
    ("edm ch", "edmond charles"),
    ("ch marie", "charles marie"),
];

// ── Nobility and status titles ─────────────────────────────────────

/// Nobility and clerical titles: canonical term → variants found in the
/// catalogs (including the usual abbreviations, e.g. "cte" for comte).
pub const NOBILITY: &[(&str, &[&str])] = &[
    ("prince", &["prince"]),
    ("princess", &["princesse"]),
    ("duke", &["duc"]),
    ("duchess", &["duchesse"]),
    ("count", &["comte", "cte"]),
    ("countess", &["comtesse", "ctesse"]),
    ("marquis", &["marquis"]),
    ("marquise", &["marquise"]),
    ("baron", &["baron"]),
    ("baroness", &["baronne"]),
    ("viscount", &["vicomte"]),
    ("viscountess", &["vicomtesse"]),
    ("cardinal", &["cardinal"]),
    ("pope", &["pape"]),
    ("lord", &["lord"]),
    ("knight", &["chevalier", "sire"]),
];

/// Occupations found in the biographical traits. Canonical term → French
/// trait words. Used as status markers during classification and to enrich
/// the knowledge-base query string.
pub const OCCUPATIONS: &[(&str, &[&str])] = &[
    ("general", &["général"]),
    ("marshal", &["maréchal"]),
    (
        "military",
        &[
            "lieutenant",
            "officier",
            "colonel",
            "lieutenant-colonel",
            "commandant",
            "capitaine",
        ],
    ),
    ("king", &["roi"]),
    ("queen", &["reine"]),
    ("emperor", &["empereur"]),
    ("president", &["président", "president"]),
    (
        "politician",
        &["homme politique", "orateur", "député", "secrétaire d'état"],
    ),
    ("writer", &["écrivain", "auteur", "romancier"]),
    ("actor", &["acteur"]),
    ("actress", &["actrice"]),
    ("singer", &["cantatrice", "chanteur", "chanteuse"]),
    ("painter", &["peintre"]),
    ("sculptor", &["sculpteur"]),
    ("composer", &["compositeur"]),
    ("musician", &["musicien", "musicienne"]),
    ("chansonnier", &["chansonnier"]),
    ("architect", &["architecte"]),
    ("journalist", &["journaliste"]),
    ("inventor", &["inventeur"]),
    ("chemist", &["chimiste"]),
];

// ── Gazetteers ─────────────────────────────────────────────────────

/// French departments: hybrid of the 1790 creation list and the 1811 list
/// (the widest the department system ever was, covering annexed Europe).
pub const DEPARTMENTS: &[&str] = &[
    "ain",
    "aisne",
    "allier",
    "basses-alpes",
    "hautes-alpes",
    "alpes-maritimes",
    "ardèche",
    "ardennes",
    "arriège",
    "arno",
    "aube",
    "aude",
    "aveyron",
    "bouches-de-l'elbe",
    "bouches-de-l'escaut",
    "bouches-de-l'yssel",
    "bouches-de-la-meuse",
    "bouches-du-rhin",
    "bouches-du-rhône",
    "bouches-du-weser",
    "calvados",
    "cantal",
    "charente",
    "charente-inférieure",
    "cher",
    "corrèze",
    "corse",
    "côte-d'or",
    "côtes-du-nord",
    "creuse",
    "deux-nèthes",
    "deux-sèvres",
    "doire",
    "dordogne",
    "doubs",
    "drôme",
    "dyle",
    "ems-occidental",
    "ems-oriental",
    "ems-supérieur",
    "escaut",
    "eure",
    "eure-et-loir",
    "finistère",
    "forêts",
    "gard",
    "haute-garonne",
    "gers",
    "gironde",
    "hérault",
    "ille-et-vilaine",
    "indre",
    "indre-et-loire",
    "isère",
    "jemappes",
    "jura",
    "landes",
    "léman",
    "loire",
    "loir-et-cher",
    "haute-loire",
    "loire-inférieure",
    "loiret",
    "lot",
    "lot-et-garonne",
    "lozère",
    "lys",
    "maine-et-loire",
    "manche",
    "marengo",
    "marne",
    "haute-marne",
    "méditerrannée",
    "mayenne",
    "meurthe",
    "meuse",
    "meuse-inférieure",
    "mont-blanc",
    "mont-tonnerre",
    "montenotte",
    "morbihan",
    "moselle",
    "nièvre",
    "nord",
    "oise",
    "ombrone",
    "orne",
    "ourte",
    "paris",
    "pas-de-calais",
    "pô",
    "puy-de-dôme",
    "hautes-pyrénées",
    "basses-pyrénées",
    "pyrénées-orientales",
    "haut-rhin",
    "bas-rhin",
    "rhin-et-moselle",
    "rhône",
    "rhône-et-loire",
    "roer",
    "rome",
    "haute-saône",
    "saône-et-loire",
    "sambre-et-meuse",
    "sarre",
    "sarthe",
    "seine",
    "seine-et-marne",
    "seine-et-oise",
    "seine-inférieure",
    "sézia",
    "simplon",
    "somme",
    "stura",
    "tarn",
    "tarn-et-garonne",
    "taro",
    "trasimène",
    "var",
    "vaucluse",
    "vendée",
    "vienne",
    "haute-vienne",
    "vosges",
    "yonne",
    "yssel-supérieur",
    "zuyderzée",
];

/// Pre-revolution French provinces.
pub const PROVINCES: &[&str] = &[
    "île-de-france",
    "berry",
    "orléanais",
    "normandie",
    "languedoc",
    "lyonnais",
    "dauphiné",
    "champagne",
    "aunis",
    "saintonge",
    "poitou",
    "guyenne et gascogne",
    "bourgogne",
    "picardie",
    "anjou",
    "provence",
    "angoumois",
    "bourbonnais",
    "marche",
    "bretagne",
    "maine",
    "touraine",
    "limousin",
    "comté de foix",
    "auvergne",
    "béarn",
    "alsace",
    "artois",
    "roussillon",
    "flandre française et hainaut français",
    "franche-comté",
    "lorraine et trois-évêchés",
    "corse",
    "nivernais",
];

/// French colonies, with alternate and old orthographies kept in the list
/// to ease matching.
pub const COLONIES: &[&str] = &[
    "canada",
    "québec",
    "ontario",
    "saint-pierre-et-miquelon",
    "mississippi",
    "missouri",
    "louisiane",
    "anguilla",
    "antigua",
    "dominique",
    "saint-domingue",
    "grenade",
    "guadeloupe",
    "haïti",
    "martinique",
    "montserrat",
    "saint-martin",
    "saint-barthélémy",
    "sainte-lucie",
    "saint-vincent-et-les-grenadines",
    "saint-eustache",
    "saint-christophe",
    "tobago",
    "brésil",
    "guyane française",
    "guyane",
    "maroc",
    "algérie",
    "algérie française",
    "tunisie",
    "fezzan",
    "dahomey",
    "bénin",
    "burkina-faso",
    "haute-volta",
    "cameroun",
    "oubangui-chari",
    "tchad",
    "congo",
    "congo français",
    "moyen-congo",
    "gabon",
    "guinée",
    "guinée française",
    "côte d'ivoire",
    "mali",
    "soudan français",
    "mauritanie",
    "niger",
    "sénégal",
    "gorée",
    "djibouti",
    "comores",
    "madagascar",
    "fort-dauphin",
    "île maurice",
    "mayotte",
    "la réunion",
    "seychelles",
    "zanzibar",
    "liban",
    "grand-liban",
    "syrie",
    "inde",
    "indes françaises",
    "pondichéry",
    "karikal",
    "yanaon",
    "mahé",
    "cambodge",
    "laos",
    "tonkin",
    "annam",
    "cochinchine",
    "shanghai",
    "nouvelle-calédonie",
    "polynésie française",
    "vanuatu",
    "nouvelles-hébrides",
    "wallis et futuna",
];

/// Countries appearing in the catalogs outside the colonial empire.
pub const COUNTRIES: &[&str] = &[
    "états-unis",
    "etats-unis",
    "états-unis d'amérique",
    "etats-unis d'amérique",
    "grèce",
    "chine",
    "angleterre",
    "espagne",
    "italie",
    "russie",
];

/// Keywords opening a historical-event reference ("Bataille d'Austerlitz",
/// "Siège de Paris, 1870").
pub const EVENT_KEYWORDS: &[&str] = &[
    "bataille",
    "guerre",
    "siège",
    "siege",
    "traité",
    "traite",
    "révolution",
    "revolution",
    "campagne",
    "sacre",
];

/// Specific named places that are not covered by the administrative
/// gazetteers: royal residences and châteaux the catalogs reference.
pub const PLACES: &[&str] = &[
    "versailles",
    "fontainebleau",
    "trianon",
    "marly",
    "compiègne",
    "chantilly",
    "vincennes",
    "saint-cloud",
    "rambouillet",
];

/// Words marking a religious building next to a department token.
pub const CHURCH_MARKERS: &[&str] = &[
    "église",
    "eglise",
    "cathédrale",
    "cathedrale",
    "abbaye",
    "chapelle",
    "couvent",
    "prieuré",
    "notre-dame",
];

/// Personal names that contain a gazetteer token but are persons.
/// Checked before any geographic rule fires.
pub const PERSON_EXCEPTIONS: &[&str] = &[
    "anne de bretagne",
    "jeanne de france",
    "marguerite de provence",
    "charles d'anjou",
];

/// Lowercase filler words stripped from a name fragment when carving out
/// the surname residue.
pub const NOISE_WORDS: &[&str] = &[
    "de", "du", "des", "d'", "la", "le", "les", "et", "dit", "dite", "né", "née",
];

// ── Owned table structs (injectable) ───────────────────────────────

/// First-name abbreviation tables consumed by the name builder.
#[derive(Debug, Clone)]
pub struct NameTables {
    pub simple: HashMap<String, String>,
    pub compound: HashMap<String, String>,
}

impl NameTables {
    pub fn from_pairs(simple: &[(&str, &str)], compound: &[(&str, &str)]) -> Self {
        NameTables {
            simple: to_map(simple),
            compound: to_map(compound),
        }
    }
}

impl Default for NameTables {
    fn default() -> Self {
        Self::from_pairs(SIMPLE_NAMES, COMPOUND_NAMES)
    }
}

/// Which gazetteer a token came from. Recorded as the auxiliary qualifier
/// on generic geographic matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GeoCategory {
    Province,
    Department,
    Colony,
    Country,
}

impl GeoCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Province => "province",
            Self::Department => "department",
            Self::Colony => "colony",
            Self::Country => "country",
        }
    }
}

/// Gazetteers and title tables consumed by the entity resolver.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    pub nobility: Vec<(String, Vec<String>)>,
    pub occupations: Vec<(String, Vec<String>)>,
    pub departments: HashSet<String>,
    pub provinces: HashSet<String>,
    pub colonies: HashSet<String>,
    pub countries: HashSet<String>,
    pub event_keywords: HashSet<String>,
    pub places: HashSet<String>,
    pub church_markers: HashSet<String>,
    pub person_exceptions: HashSet<String>,
    pub noise_words: HashSet<String>,
}

impl Gazetteer {
    /// Category of a single case-folded token, checking the narrower
    /// categories first (a department token wins over a homonym province).
    pub fn categorize(&self, token: &str) -> Option<GeoCategory> {
        if self.departments.contains(token) {
            Some(GeoCategory::Department)
        } else if self.provinces.contains(token) {
            Some(GeoCategory::Province)
        } else if self.colonies.contains(token) {
            Some(GeoCategory::Colony)
        } else if self.countries.contains(token) {
            Some(GeoCategory::Country)
        } else {
            None
        }
    }
}

impl Default for Gazetteer {
    fn default() -> Self {
        Gazetteer {
            nobility: to_variant_table(NOBILITY),
            occupations: to_variant_table(OCCUPATIONS),
            departments: to_set(DEPARTMENTS),
            provinces: to_set(PROVINCES),
            colonies: to_set(COLONIES),
            countries: to_set(COUNTRIES),
            event_keywords: to_set(EVENT_KEYWORDS),
            places: to_set(PLACES),
            church_markers: to_set(CHURCH_MARKERS),
            person_exceptions: to_set(PERSON_EXCEPTIONS),
            noise_words: to_set(NOISE_WORDS),
        }
    }
}

fn to_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn to_set(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn to_variant_table(table: &[(&str, &[&str])]) -> Vec<(String, Vec<String>)> {
    table
        .iter()
        .map(|(canonical, variants)| {
            (
                canonical.to_string(),
                variants.iter().map(|v| v.to_string()).collect(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_load() {
        let names = NameTables::default();
        assert_eq!(names.simple.get("ch").map(String::as_str), Some("charles"));
        assert_eq!(
            names.compound.get("j b").map(String::as_str),
            Some("jean baptiste")
        );
    }

    #[test]
    fn department_wins_over_homonyms() {
        let gaz = Gazetteer::default();
        // "corse" appears in both historical lists; the department entry wins
        assert_eq!(gaz.categorize("corse"), Some(GeoCategory::Department));
        assert_eq!(gaz.categorize("bretagne"), Some(GeoCategory::Province));
        assert_eq!(gaz.categorize("canada"), Some(GeoCategory::Colony));
        assert_eq!(gaz.categorize("grèce"), Some(GeoCategory::Country));
        assert_eq!(gaz.categorize("atlantide"), None);
    }
}
