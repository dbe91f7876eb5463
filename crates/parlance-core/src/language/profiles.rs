//! Built-in Spanish and English profiles.

use super::{Language, LanguageProfile};
use crate::analysis::{TopicCategory, TopicCorpus};
use crate::text::fold_accents;
use std::collections::HashSet;

fn set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn list(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn category(name: &str, topics: &[&str]) -> TopicCategory {
    TopicCategory {
        name: name.to_string(),
        topics: list(topics),
    }
}

fn push_unique(forms: &mut Vec<String>, form: String) {
    if !forms.contains(&form) {
        forms.push(form);
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'á' | 'é' | 'í' | 'ó' | 'ú')
}

// ─────────────────────────────────────────────────────────────────────────────
// Spanish
// ─────────────────────────────────────────────────────────────────────────────

/// Spanish inflections of `word`: plurals, `-mente` adverbs, `-ico/-ica`
/// adjectives, the o→a gender flip and the plural of `-ción`, `-dad` and `-z`.
pub fn spanish_forms(word: &str) -> Vec<String> {
    let word = word.to_lowercase();
    let mut forms = Vec::new();

    push_unique(&mut forms, format!("{word}s"));
    push_unique(&mut forms, format!("{word}es"));
    push_unique(&mut forms, format!("{word}mente"));

    let stem = match word.chars().last() {
        Some(c) if is_vowel(c) => &word[..word.len() - c.len_utf8()],
        _ => word.as_str(),
    };
    for suffix in ["ico", "ica", "icos", "icas"] {
        push_unique(&mut forms, format!("{stem}{suffix}"));
    }

    if let Some(base) = word.strip_suffix('o') {
        push_unique(&mut forms, format!("{base}a"));
        push_unique(&mut forms, format!("{base}as"));
    }
    if let Some(base) = word.strip_suffix("ción") {
        push_unique(&mut forms, format!("{base}ciones"));
    }
    if word.ends_with("dad") {
        push_unique(&mut forms, format!("{word}es"));
    }
    if let Some(base) = word.strip_suffix('z') {
        push_unique(&mut forms, format!("{base}ces"));
    }

    forms
}

/// Built-in Spanish profile.
pub fn spanish_profile() -> LanguageProfile {
    LanguageProfile {
        language: Language::Es,
        display_name: "Spanish".to_string(),
        markers: set(&[
            "el", "la", "los", "las", "de", "del", "que", "en", "un", "una", "es", "por",
            "para", "con", "se", "lo", "como", "pero", "más", "este", "esta", "qué", "cómo",
            "hola", "gracias", "sí", "muy", "también", "porque", "cuando", "donde", "yo",
            "tengo", "quiero", "puedes", "sobre", "está", "son", "hay", "mi", "tu", "al",
        ]),
        special_chars: "áéíóúñ¿¡ü".to_string(),
        special_char_bonus: 2,
        interrogatives: [
            "qué", "cómo", "cuándo", "dónde", "por qué", "para qué", "quién", "quiénes",
            "cuál", "cuáles", "cuánto", "cuánta", "cuántos", "cuántas",
        ]
        .iter()
        .map(|w| fold_accents(w))
        .collect(),
        common_words: set(&[
            "para", "como", "pero", "este", "esta", "esto", "estos", "estas", "sobre", "entre",
            "cuando", "donde", "porque", "también", "muy", "más", "menos", "todo", "todos",
            "toda", "todas", "algo", "alguien", "nada", "mucho", "mucha", "muchos", "muchas",
            "poco", "otro", "otra", "otros", "otras", "mismo", "misma", "cada", "desde",
            "hasta", "hacia", "según", "durante", "mediante", "tiene", "tienen", "tengo",
            "tener", "hacer", "hace", "hago", "puede", "puedes", "puedo", "poder", "quiero",
            "quieres", "querer", "necesito", "necesitas", "saber", "sabes", "explicar",
            "explica", "explícame", "ayuda", "ayudar", "ayúdame", "favor", "hola", "gracias",
            "bueno", "buena", "buenos", "buenas", "estar", "estoy", "está", "están", "eres",
            "somos", "será", "sería", "sido", "ser", "fue", "fueron", "había", "hay", "cual",
            "cuál", "quién", "qué", "cómo", "dónde", "cuándo", "ellos", "ellas", "nosotros",
            "usted", "ustedes", "mío", "tuyo", "suyo", "nuestro", "vuestro", "aquí", "allí",
            "ahora", "antes", "después", "luego", "siempre", "nunca", "solo", "sólo", "bien",
            "quisiera", "podrías", "dime", "decir", "cosa", "cosas", "manera", "forma",
        ]),
        default_title: "Nueva conversación".to_string(),
        generic_titles: list(&[
            "Nueva conversación",
            "Conversación",
            "Nuevo chat",
            "Chat",
            "Sin título",
            "Conversación sin título",
        ]),
        topic_prefix: "Conversación sobre".to_string(),
        conjunction: "y".to_string(),
        other_topics_text: "y otros temas".to_string(),
        topics: TopicCorpus::new(vec![
            category(
                "tecnología",
                &[
                    "programación",
                    "software",
                    "hardware",
                    "inteligencia artificial",
                    "algoritmo",
                    "computadora",
                    "ordenador",
                    "internet",
                    "tecnología",
                    "código",
                    "aplicación",
                    "robótica",
                    "ciberseguridad",
                    "base de datos",
                    "redes sociales",
                    "videojuego",
                ],
            ),
            category(
                "ciencia",
                &[
                    "ciencia",
                    "física",
                    "química",
                    "biología",
                    "matemáticas",
                    "astronomía",
                    "fotosíntesis",
                    "genética",
                    "evolución",
                    "energía",
                    "clima",
                    "universo",
                    "experimento",
                ],
            ),
            category(
                "salud",
                &[
                    "salud",
                    "medicina",
                    "nutrición",
                    "ejercicio",
                    "enfermedad",
                    "dieta",
                    "psicología",
                    "sueño",
                    "vacuna",
                    "ansiedad",
                ],
            ),
            category(
                "humanidades",
                &[
                    "historia",
                    "filosofía",
                    "literatura",
                    "música",
                    "pintura",
                    "poesía",
                    "cultura",
                    "idioma",
                    "religión",
                    "política",
                    "educación",
                ],
            ),
            category(
                "estilo de vida",
                &[
                    "viaje",
                    "cocina",
                    "receta",
                    "deporte",
                    "moda",
                    "jardinería",
                    "mascota",
                    "fotografía",
                    "película",
                    "familia",
                ],
            ),
            category(
                "negocios",
                &[
                    "negocio",
                    "economía",
                    "finanzas",
                    "marketing",
                    "empresa",
                    "inversión",
                    "emprendimiento",
                    "ventas",
                    "contabilidad",
                    "criptomoneda",
                ],
            ),
        ]),
        derive_forms: spanish_forms,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// English
// ─────────────────────────────────────────────────────────────────────────────

/// English inflections of `word`: `-s/-es/-ed/-ing/-ly/-er/-est`, `y→ies`,
/// silent-`e` dropping and consonant doubling before `-ed`/`-ing`.
pub fn english_forms(word: &str) -> Vec<String> {
    let word = word.to_lowercase();
    let mut forms = Vec::new();

    for suffix in ["s", "es", "ed", "ing", "ly", "er", "est"] {
        push_unique(&mut forms, format!("{word}{suffix}"));
    }

    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();

    if let Some(base) = word.strip_suffix('y') {
        if n >= 2 && !is_vowel(chars[n - 2]) {
            push_unique(&mut forms, format!("{base}ies"));
            push_unique(&mut forms, format!("{base}ied"));
        }
    }

    if let Some(base) = word.strip_suffix('e') {
        push_unique(&mut forms, format!("{base}ing"));
    }

    // consonant-vowel-consonant endings double the final consonant
    if n >= 3 {
        let (c1, v, c2) = (chars[n - 3], chars[n - 2], chars[n - 1]);
        if !is_vowel(c1) && is_vowel(v) && !is_vowel(c2) && !matches!(c2, 'w' | 'x' | 'y') {
            push_unique(&mut forms, format!("{word}{c2}ed"));
            push_unique(&mut forms, format!("{word}{c2}ing"));
        }
    }

    forms
}

/// Built-in English profile.
pub fn english_profile() -> LanguageProfile {
    LanguageProfile {
        language: Language::En,
        display_name: "English".to_string(),
        markers: set(&[
            "the", "is", "are", "and", "of", "to", "in", "that", "it", "for", "with", "you",
            "this", "what", "how", "why", "hello", "thanks", "please", "can", "do", "does",
            "my", "your", "have", "was", "be", "on", "an", "about", "would", "could",
        ]),
        special_chars: String::new(),
        special_char_bonus: 0,
        interrogatives: list(&[
            "what", "how", "why", "when", "where", "who", "whom", "whose", "which", "can",
            "could", "would", "should", "is", "are", "do", "does", "did", "will",
        ]),
        common_words: set(&[
            "that", "this", "with", "from", "have", "has", "what", "when", "where", "which",
            "would", "could", "should", "about", "there", "their", "these", "those", "please",
            "thanks", "thank", "hello", "want", "need", "know", "like", "just", "some", "more",
            "make", "tell", "explain", "help", "your", "they", "will", "been", "were", "into",
            "than", "then", "them", "also", "very", "does", "doing", "done", "being", "here",
            "much", "many", "most", "other", "such", "only", "over", "after", "before",
            "while", "because", "really", "thing", "things", "something", "anything", "going",
            "get", "give", "take", "good", "well", "even", "still", "again", "always", "never",
            "every", "each", "both", "either", "whether", "might", "must", "shall", "yours",
            "ours", "mine", "hers", "myself", "yourself", "okay",
        ]),
        default_title: "New conversation".to_string(),
        generic_titles: list(&[
            "New conversation",
            "Conversation",
            "New chat",
            "Chat",
            "Untitled",
            "Untitled conversation",
        ]),
        topic_prefix: "Conversation about".to_string(),
        conjunction: "and".to_string(),
        other_topics_text: "and other topics".to_string(),
        topics: TopicCorpus::new(vec![
            category(
                "technology",
                &[
                    "programming",
                    "software",
                    "hardware",
                    "artificial intelligence",
                    "algorithm",
                    "computer",
                    "internet",
                    "technology",
                    "coding",
                    "database",
                    "robotics",
                    "cybersecurity",
                    "social media",
                    "video game",
                ],
            ),
            category(
                "science",
                &[
                    "science",
                    "physics",
                    "chemistry",
                    "biology",
                    "mathematics",
                    "astronomy",
                    "photosynthesis",
                    "genetics",
                    "evolution",
                    "energy",
                    "climate",
                    "universe",
                    "experiment",
                ],
            ),
            category(
                "health",
                &[
                    "health",
                    "medicine",
                    "nutrition",
                    "exercise",
                    "disease",
                    "diet",
                    "psychology",
                    "sleep",
                    "vaccine",
                    "anxiety",
                ],
            ),
            category(
                "humanities",
                &[
                    "history",
                    "philosophy",
                    "literature",
                    "music",
                    "painting",
                    "poetry",
                    "culture",
                    "language",
                    "religion",
                    "politics",
                    "education",
                ],
            ),
            category(
                "lifestyle",
                &[
                    "travel",
                    "cooking",
                    "recipe",
                    "sport",
                    "fashion",
                    "gardening",
                    "photography",
                    "movie",
                    "family",
                ],
            ),
            category(
                "business",
                &[
                    "business",
                    "economy",
                    "finance",
                    "marketing",
                    "company",
                    "investment",
                    "entrepreneurship",
                    "sales",
                    "accounting",
                    "cryptocurrency",
                ],
            ),
        ]),
        derive_forms: english_forms,
    }
}
