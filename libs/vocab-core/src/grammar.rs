//! Italian noun grammar rules for the plural and indefinite-article drills.
//!
//! Noun lectures encode gender through the definite article on the key:
//! `"il libro"`, `"lo studente"`, `"la casa"`, `"l'amica"`. Plurals are
//! derived by last-letter substitution only; irregular nouns are not modeled.

use crate::error::{Result, VocabError};
use crate::matching::normalize;

const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Singular definite article of a noun key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Article {
    Il,
    Lo,
    La,
    /// `l'`, used before vowels for both genders.
    Elided,
}

impl Article {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Il => "il",
            Self::Lo => "lo",
            Self::La => "la",
            Self::Elided => "l'",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Masculine,
    Feminine,
}

/// A noun key split into its definite article and root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Noun {
    pub article: Article,
    pub root: String,
}

impl Noun {
    /// Split a noun key such as `"lo studente"` into article and root.
    pub fn parse(key: &str) -> Result<Self> {
        let normalized = normalize(key);
        let (article, rest) = if let Some(rest) = normalized.strip_prefix("il ") {
            (Article::Il, rest)
        } else if let Some(rest) = normalized.strip_prefix("lo ") {
            (Article::Lo, rest)
        } else if let Some(rest) = normalized.strip_prefix("la ") {
            (Article::La, rest)
        } else if let Some(rest) = normalized.strip_prefix("l'") {
            (Article::Elided, rest)
        } else {
            return Err(VocabError::NotANoun {
                key: key.to_string(),
            });
        };

        let root = rest.trim();
        if root.is_empty() {
            return Err(VocabError::NotANoun {
                key: key.to_string(),
            });
        }

        Ok(Self {
            article,
            root: root.to_string(),
        })
    }

    pub fn gender(&self) -> Gender {
        infer_gender(self.article, &self.root)
    }

    /// Plural with its definite article, e.g. `"gli studenti"`.
    pub fn plural(&self) -> String {
        let gender = self.gender();
        let article = match (gender, self.article) {
            (Gender::Feminine, _) => "le",
            (Gender::Masculine, Article::Lo | Article::Elided) => "gli",
            (Gender::Masculine, _) => "i",
        };
        format!("{} {}", article, plural_root(&self.root))
    }

    /// Indefinite article matching this noun.
    pub fn indefinite_article(&self) -> &'static str {
        match self.gender() {
            Gender::Feminine => {
                if starts_with_vowel(&self.root) {
                    "un'"
                } else {
                    "una"
                }
            }
            Gender::Masculine => {
                if self.article == Article::Lo || needs_uno(&self.root) {
                    "uno"
                } else {
                    "un"
                }
            }
        }
    }

    /// Indefinite article and root, elided where Italian elides (`"un'amica"`).
    pub fn indefinite_form(&self) -> String {
        let article = self.indefinite_article();
        if article.ends_with('\'') {
            format!("{}{}", article, self.root)
        } else {
            format!("{} {}", article, self.root)
        }
    }
}

/// Gender from the singular article; `l'` is resolved by the root's final letter.
pub fn infer_gender(article: Article, root: &str) -> Gender {
    match article {
        Article::Il | Article::Lo => Gender::Masculine,
        Article::La => Gender::Feminine,
        Article::Elided => {
            if root.ends_with('a') {
                Gender::Feminine
            } else {
                Gender::Masculine
            }
        }
    }
}

/// Plural form of an article-prefixed noun key.
pub fn plural_form(entry: &str) -> Result<String> {
    Noun::parse(entry).map(|noun| noun.plural())
}

/// Indefinite article for an article-prefixed noun key.
pub fn indefinite_article(entry: &str) -> Result<&'static str> {
    Noun::parse(entry).map(|noun| noun.indefinite_article())
}

/// Indefinite article followed by the noun root.
pub fn indefinite_form(entry: &str) -> Result<String> {
    Noun::parse(entry).map(|noun| noun.indefinite_form())
}

fn plural_root(root: &str) -> String {
    let mut chars: Vec<char> = root.chars().collect();
    if let Some(last) = chars.last_mut() {
        *last = match *last {
            'o' => 'i',
            'a' => 'e',
            'e' => 'i',
            other => other,
        };
    }
    chars.into_iter().collect()
}

fn starts_with_vowel(root: &str) -> bool {
    root.chars().next().is_some_and(|c| VOWELS.contains(&c))
}

fn needs_uno(root: &str) -> bool {
    let mut chars = root.chars();
    match (chars.next(), chars.next()) {
        (Some('s'), Some(next)) => next.is_alphabetic() && !VOWELS.contains(&next),
        (Some('z'), _) => true,
        _ => root.starts_with("ps") || root.starts_with("gn"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plural_examples() {
        assert_eq!(plural_form("il libro").unwrap(), "i libri");
        assert_eq!(plural_form("la casa").unwrap(), "le case");
        assert_eq!(plural_form("lo studente").unwrap(), "gli studenti");
        assert_eq!(plural_form("l'amico").unwrap(), "gli amici");
        assert_eq!(plural_form("l'isola").unwrap(), "le isole");
        assert_eq!(plural_form("il padre").unwrap(), "i padri");
    }

    #[test]
    fn plural_leaves_other_endings_unchanged() {
        assert_eq!(plural_form("la città").unwrap(), "le città");
        assert_eq!(plural_form("il bar").unwrap(), "i bar");
    }

    #[test]
    fn indefinite_examples() {
        assert_eq!(indefinite_article("il libro").unwrap(), "un");
        assert_eq!(indefinite_article("la casa").unwrap(), "una");
        assert_eq!(indefinite_article("lo studente").unwrap(), "uno");
        assert_eq!(indefinite_article("l'isola").unwrap(), "un'");
        assert_eq!(indefinite_article("l'albero").unwrap(), "un");
    }

    #[test]
    fn uno_before_special_clusters() {
        assert_eq!(indefinite_article("il sport").unwrap(), "uno");
        assert_eq!(indefinite_article("il zaino").unwrap(), "uno");
        assert_eq!(indefinite_article("il psicologo").unwrap(), "uno");
        assert_eq!(indefinite_article("il gnomo").unwrap(), "uno");
        assert_eq!(indefinite_article("il sale").unwrap(), "un");
    }

    #[test]
    fn elided_gender_follows_final_letter() {
        assert_eq!(infer_gender(Article::Elided, "amica"), Gender::Feminine);
        assert_eq!(infer_gender(Article::Elided, "albero"), Gender::Masculine);
        assert_eq!(infer_gender(Article::Lo, "zaino"), Gender::Masculine);
        assert_eq!(infer_gender(Article::La, "mano"), Gender::Feminine);
    }

    #[test]
    fn indefinite_form_elides_before_vowel() {
        assert_eq!(indefinite_form("l'amica").unwrap(), "un'amica");
        assert_eq!(indefinite_form("lo studente").unwrap(), "uno studente");
    }

    #[test]
    fn parse_normalizes_key() {
        let noun = Noun::parse(" L\u{2019}Amica").unwrap();
        assert_eq!(noun.article, Article::Elided);
        assert_eq!(noun.root, "amica");
    }

    #[test]
    fn keys_without_article_are_rejected() {
        assert!(matches!(plural_form("avere"), Err(VocabError::NotANoun { .. })));
        assert!(matches!(plural_form("il "), Err(VocabError::NotANoun { .. })));
        assert!(matches!(indefinite_article("gli amici"), Err(VocabError::NotANoun { .. })));
    }
}
