//! Malayalam → English symptom phrase table
//!
//! A fixed mapping from common Malayalam symptom phrases to the English
//! vocabulary names. Free-text prediction does not consult it; it backs the
//! offline [`PhraseTableTranslator`](crate::translate::PhraseTableTranslator).

/// (Malayalam phrase, English symptom)
const MALAYALAM_TO_ENGLISH: &[(&str, &str)] = &[
    ("പനി", "fever"),
    ("ചുമ", "cough"),
    ("തലവേദന", "headache"),
    ("തൊണ്ടവേദന", "sore throat"),
    ("തലകറക്കം", "dizziness"),
];

/// Phrase-to-symptom lookup table
#[derive(Debug, Clone)]
pub struct LocalizationTable {
    entries: Vec<(String, String)>,
}

impl LocalizationTable {
    /// The built-in Malayalam table
    pub fn malayalam() -> Self {
        Self::from_pairs(MALAYALAM_TO_ENGLISH.iter().copied())
    }

    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(phrase, english)| (phrase.to_string(), english.to_string()))
                .collect(),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, e)| (p.as_str(), e.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace every known phrase in the text with its English symptom.
    /// Longer phrases are substituted first so a phrase that contains a
    /// shorter one is not split.
    pub fn substitute(&self, text: &str) -> String {
        let mut ordered: Vec<&(String, String)> = self.entries.iter().collect();
        ordered.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));

        let mut out = text.to_string();
        for (phrase, english) in ordered {
            out = out.replace(phrase.as_str(), &format!(" {} ", english));
        }
        out.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

impl Default for LocalizationTable {
    fn default() -> Self {
        Self::malayalam()
    }
}
