//! French to English query term expansion.
//!
//! The corpus is English-language standards text, but operators query
//! in French. A static bilingual synonym table maps French terms to
//! one or more English equivalents; expansion multiplies the parsed
//! terms before matching.

use std::collections::{HashMap, HashSet};

use super::SearchTerm;

/// Static French to English synonym table, loaded once at startup.
pub struct TranslationTable {
    entries: HashMap<String, Vec<String>>,
}

impl TranslationTable {
    /// Build the built-in human-factors vocabulary table.
    pub fn builtin() -> Self {
        let mut entries = HashMap::new();
        for (french, english) in BUILTIN_ENTRIES {
            entries.insert(
                french.to_string(),
                english.iter().map(|s| s.to_string()).collect(),
            );
        }
        Self { entries }
    }

    /// Build a table from explicit entries (used by tests).
    pub fn from_entries<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| {
                (
                    k.into().to_lowercase(),
                    v.into_iter().map(Into::into).collect(),
                )
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expand query terms with English equivalents.
    ///
    /// Identity for any language other than `"fr"`. Exact table hits
    /// keep the source term's exactness. A containment pass (term
    /// contains a table key, or a key contains the term) adds the
    /// key's equivalents as non-exact terms, but never applies to
    /// exact phrase terms: substring expansion would corrupt phrase
    /// semantics. Originals are always retained and the output is
    /// deduplicated by `(lowercased text, is_exact)` in first-seen
    /// order.
    pub fn expand(&self, terms: &[SearchTerm], language: &str) -> Vec<SearchTerm> {
        if language != "fr" {
            return terms.to_vec();
        }

        let mut expanded = Vec::new();
        for term in terms {
            let needle = term.text.trim().to_lowercase();
            expanded.push(term.clone());

            if let Some(equivalents) = self.entries.get(&needle) {
                for english in equivalents {
                    expanded.push(SearchTerm::new(english.clone(), term.is_exact));
                }
            }

            if !term.is_exact {
                for (french, equivalents) in &self.entries {
                    if french == &needle {
                        continue;
                    }
                    if needle.contains(french.as_str()) || french.contains(&needle) {
                        for english in equivalents {
                            expanded.push(SearchTerm::new(english.clone(), false));
                        }
                    }
                }
            }
        }

        let mut seen = HashSet::new();
        expanded
            .into_iter()
            .filter(|term| seen.insert(term.dedup_key()))
            .collect()
    }
}

/// Built-in vocabulary: human factors / ergonomics standards terms.
const BUILTIN_ENTRIES: &[(&str, &[&str])] = &[
    ("ergonomie", &["ergonomics", "human factors", "usability"]),
    ("sécurité", &["safety", "security"]),
    ("bruit", &["noise", "sound", "acoustic"]),
    ("éclairage", &["lighting", "illumination"]),
    ("contrôle", &["control", "management"]),
    ("interface", &["interface", "display"]),
    ("hauteur", &["height", "clearance"]),
    ("dégagement", &["clearance", "space"]),
    ("tête", &["head", "cranial"]),
    ("espace", &["space", "room", "area"]),
    ("dimension", &["dimension", "size", "measurement"]),
    ("anthropométrie", &["anthropometry", "body measurements"]),
    ("poste de travail", &["workstation", "workplace"]),
    ("cockpit", &["cockpit", "flight deck"]),
    ("cabine", &["cabin", "compartment"]),
    ("siège", &["seat", "seating"]),
    ("panneau", &["panel", "display"]),
    ("commande", &["control", "command"]),
    ("vision", &["vision", "sight", "visibility"]),
    ("champ de vision", &["field of view", "visual field"]),
    ("température", &["temperature", "thermal"]),
    ("vibration", &["vibration"]),
    ("accélération", &["acceleration"]),
    ("force", &["force", "strength"]),
    ("charge", &["load", "weight"]),
    ("fatigue", &["fatigue", "tiredness"]),
    ("stress", &["stress"]),
    ("performance", &["performance"]),
    ("erreur", &["error", "mistake"]),
    ("alarme", &["alarm", "warning"]),
    ("signal", &["signal", "indicator"]),
    ("couleur", &["color", "colour"]),
    ("forme", &["shape", "form"]),
    ("taille", &["size"]),
    ("position", &["position", "location"]),
    ("mouvement", &["movement", "motion"]),
    ("geste", &["gesture", "movement"]),
    ("main", &["hand", "manual"]),
    ("doigt", &["finger"]),
    ("pied", &["foot", "pedal"]),
    ("jambe", &["leg"]),
    ("bras", &["arm"]),
    ("épaule", &["shoulder"]),
    ("dos", &["back", "spine"]),
    ("cou", &["neck"]),
    ("posture", &["posture", "position"]),
    ("confort", &["comfort"]),
    ("douleur", &["pain", "discomfort"]),
    ("risque", &["risk", "hazard"]),
    ("prévention", &["prevention"]),
    ("norme", &["standard", "norm"]),
    ("spécification", &["specification", "requirement"]),
    ("exigence", &["requirement", "demand"]),
    ("test", &["test", "testing"]),
    ("mesure", &["measure", "measurement"]),
    ("évaluation", &["evaluation", "assessment"]),
    ("analyse", &["analysis"]),
    ("conception", &["design", "conception"]),
    ("développement", &["development"]),
    ("amélioration", &["improvement"]),
    ("optimisation", &["optimization"]),
    ("efficacité", &["efficiency", "effectiveness"]),
    ("productivité", &["productivity"]),
    ("qualité", &["quality"]),
    ("fiabilité", &["reliability"]),
    ("maintenance", &["maintenance"]),
    ("formation", &["training"]),
    ("instruction", &["instruction"]),
    ("procédure", &["procedure"]),
    ("méthode", &["method"]),
    ("technique", &["technique"]),
    ("outil", &["tool"]),
    ("instrument", &["instrument"]),
    ("technologie", &["technology"]),
    ("innovation", &["innovation"]),
    ("recherche", &["research"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_for_english() {
        let table = TranslationTable::builtin();
        let terms = vec![SearchTerm::new("sécurité", false)];
        assert_eq!(table.expand(&terms, "en"), terms);
    }

    #[test]
    fn expands_french_term_and_keeps_original_once() {
        let table = TranslationTable::builtin();
        let terms = vec![SearchTerm::new("sécurité", false)];
        let expanded = table.expand(&terms, "fr");

        assert!(expanded.contains(&SearchTerm::new("safety", false)));
        assert!(expanded.contains(&SearchTerm::new("security", false)));
        let originals = expanded
            .iter()
            .filter(|t| t.text == "sécurité" && !t.is_exact)
            .count();
        assert_eq!(originals, 1);

        // No duplicate (text, is_exact) pairs anywhere in the output.
        let mut seen = std::collections::HashSet::new();
        for term in &expanded {
            assert!(seen.insert(term.dedup_key()), "duplicate: {:?}", term);
        }
    }

    #[test]
    fn exact_table_hit_keeps_exactness() {
        let table = TranslationTable::builtin();
        let terms = vec![SearchTerm::new("poste de travail", true)];
        let expanded = table.expand(&terms, "fr");
        assert!(expanded.contains(&SearchTerm::new("workstation", true)));
    }

    #[test]
    fn containment_expansion_is_non_exact_only() {
        let table = TranslationTable::builtin();

        // "dégagements" contains the key "dégagement": containment hit.
        let bare = vec![SearchTerm::new("dégagements", false)];
        let expanded = table.expand(&bare, "fr");
        assert!(expanded.contains(&SearchTerm::new("clearance", false)));

        // The same text as an exact phrase gets no containment pass.
        let exact = vec![SearchTerm::new("dégagements", true)];
        let expanded = table.expand(&exact, "fr");
        assert_eq!(expanded, exact);
    }

    #[test]
    fn first_seen_order_preserved() {
        let table = TranslationTable::from_entries([("tête", vec!["head", "cranial"])]);
        let terms = vec![SearchTerm::new("tête", false)];
        let expanded = table.expand(&terms, "fr");
        assert_eq!(expanded[0].text, "tête");
        assert_eq!(expanded[1].text, "head");
        assert_eq!(expanded[2].text, "cranial");
    }
}
