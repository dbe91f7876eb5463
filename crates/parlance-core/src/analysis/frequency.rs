use crate::text::char_len;
use std::collections::HashMap;

/// Size of the simulated reference corpus.
pub const DEFAULT_CORPUS_SIZE: u32 = 1000;

const TECHNICAL_SUFFIXES: &[&str] = &["ción", "miento", "ología", "ística", "logía", "nomía"];
const COMMON_PREFIXES: &[&str] = &["sobre", "sub", "re", "pre", "con", "des"];

const COMMON_TIER_DF: u32 = 800;
const GENERAL_TIER_DF: u32 = 200;
const SPECIALIZED_TIER_DF: u32 = 20;

const COMMON_TERMS: &[&str] = &[
    // es
    "información", "persona", "personas", "tiempo", "forma", "parte", "manera", "ejemplo",
    "problema", "pregunta", "respuesta", "trabajo", "mundo", "general", "importante",
    "sistema", "gente", "momento", "lugar", "caso", "vida", "día", "años", "tipo",
    // en
    "information", "people", "person", "time", "example", "problem", "question", "answer",
    "work", "world", "general", "important", "system", "place", "case", "life", "year",
    "years", "type", "way",
];

const GENERAL_TERMS: &[&str] = &[
    // es
    "tecnología", "proceso", "desarrollo", "servicio", "proyecto", "programa", "empresa",
    "datos", "historia", "música", "educación", "salud", "ciencia", "mercado", "usuario",
    "cliente", "diseño", "estudio", "análisis",
    // en
    "technology", "process", "development", "service", "project", "program", "company",
    "data", "history", "music", "education", "health", "science", "market", "user",
    "customer", "design", "study", "analysis",
];

const SPECIALIZED_TERMS: &[&str] = &[
    // es
    "algoritmo", "fotosíntesis", "criptomoneda", "neurociencia", "termodinámica",
    "epistemología", "mitocondria", "blockchain", "kubernetes", "compilador",
    // en
    "algorithm", "photosynthesis", "cryptocurrency", "neuroscience", "thermodynamics",
    "epistemology", "mitochondria", "compiler", "microservices",
];

/// Simulated document-frequency table.
///
/// Known terms map to a tiered document frequency; unseen terms get a
/// heuristic estimate from their morphology and length.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    frequencies: HashMap<String, u32>,
    corpus_size: u32,
}

impl FrequencyTable {
    /// Builds a table from explicit `(term, document frequency)` pairs.
    pub fn new(frequencies: HashMap<String, u32>, corpus_size: u32) -> Self {
        let frequencies = frequencies
            .into_iter()
            .map(|(term, df)| (term.to_lowercase(), df))
            .collect();
        Self {
            frequencies,
            corpus_size,
        }
    }

    /// The built-in three-tier table over a corpus of [`DEFAULT_CORPUS_SIZE`].
    pub fn builtin() -> Self {
        let mut frequencies = HashMap::new();
        for (terms, df) in [
            (COMMON_TERMS, COMMON_TIER_DF),
            (GENERAL_TERMS, GENERAL_TIER_DF),
            (SPECIALIZED_TERMS, SPECIALIZED_TIER_DF),
        ] {
            for term in terms {
                frequencies.entry(term.to_string()).or_insert(df);
            }
        }
        Self::new(frequencies, DEFAULT_CORPUS_SIZE)
    }

    pub fn corpus_size(&self) -> u32 {
        self.corpus_size
    }

    /// Document frequency of `term`, estimated when the table does not know it.
    pub fn document_frequency(&self, term: &str) -> f64 {
        match self.frequencies.get(term) {
            Some(df) => f64::from(*df),
            None => Self::estimate(term),
        }
    }

    /// Inverse document frequency: `ln(corpus_size / (df + 1))`.
    pub fn idf(&self, term: &str) -> f64 {
        (f64::from(self.corpus_size) / (self.document_frequency(term) + 1.0)).ln()
    }

    /// Heuristic frequency for an unseen term.
    ///
    /// Technical suffixes make a word rarer, common prefixes make it more
    /// frequent, and short words are assumed more frequent than long ones.
    pub fn estimate(term: &str) -> f64 {
        let base = if TECHNICAL_SUFFIXES.iter().any(|s| term.ends_with(s)) {
            60.0
        } else if COMMON_PREFIXES.iter().any(|p| term.starts_with(p)) {
            200.0
        } else {
            100.0
        };
        let length_factor = (10.0 - char_len(term) as f64 / 2.0).max(1.0);
        (base * length_factor).clamp(10.0, 500.0)
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::builtin()
    }
}
