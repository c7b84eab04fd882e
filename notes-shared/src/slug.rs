//! Slug generation and validation
//!
//! Slugs are the URL-safe identifiers notes are addressed by. They contain only
//! ASCII letters, digits, `-` and `_`, and are at most [`MAX_SLUG_LENGTH`]
//! characters long.
//!
//! When a note is saved without a slug one is derived from its title:
//!
//! 1. The title is lowercased
//! 2. Cyrillic letters are transliterated to Latin
//! 3. Characters other than letters, digits and `_` are dropped
//! 4. Runs of whitespace and `-` collapse into a single `-`
//! 5. Leading and trailing `-`/`_` are trimmed
//! 6. The result is cut to [`MAX_SLUG_LENGTH`] characters, then trailing
//!    `-`/`_` are trimmed again
//!
//! # Example
//!
//! ```
//! use notes_shared::slug::slugify;
//!
//! assert_eq!(slugify("Shopping list"), "shopping-list");
//! assert_eq!(slugify("Заметка 1"), "zametka-1");
//! ```

/// Maximum slug length (matches the `notes.slug` column)
pub const MAX_SLUG_LENGTH: usize = 100;

fn transliterate(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ё' => "yo",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ы' => "y",
        'э' => "e",
        'ю' => "yu",
        'я' => "ya",
        'і' => "i",
        'ї' => "yi",
        'є' => "ye",
        'ґ' => "g",
        _ => return None,
    };
    Some(latin)
}

/// Derives a slug from free text (usually a note title)
///
/// May return an empty string when the text has no usable characters.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        let piece: &str;
        let mut buf = [0u8; 4];

        if c.is_whitespace() || c == '-' {
            pending_dash = true;
            continue;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            piece = c.encode_utf8(&mut buf);
        } else if let Some(latin) = transliterate(c) {
            if latin.is_empty() {
                continue;
            }
            piece = latin;
        } else {
            continue;
        }

        if pending_dash && !out.is_empty() {
            out.push('-');
        }
        pending_dash = false;
        out.push_str(piece);
    }

    let trimmed = out.trim_matches(|c| c == '-' || c == '_');
    let truncated: String = trimmed.chars().take(MAX_SLUG_LENGTH).collect();
    truncated.trim_end_matches(|c| c == '-' || c == '_').to_string()
}

/// Returns true if every character is allowed in a slug
///
/// An empty string passes; emptiness is checked separately because a blank
/// slug means "generate one".
pub fn has_valid_slug_chars(slug: &str) -> bool {
    slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_latin() {
        assert_eq!(slugify("Title"), "title");
        assert_eq!(slugify("New title"), "new-title");
        assert_eq!(slugify("  Note   23  "), "note-23");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn test_slugify_drops_punctuation() {
        assert_eq!(slugify("Hello, world!"), "hello-world");
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("--edge--"), "edge");
    }

    #[test]
    fn test_slugify_transliterates_cyrillic() {
        assert_eq!(slugify("Заголовок"), "zagolovok");
        assert_eq!(slugify("Щука и ёж"), "schuka-i-yozh");
        assert_eq!(slugify("Объявление"), "obyavlenie");
    }

    #[test]
    fn test_slugify_truncates() {
        let title = "a".repeat(150);
        assert_eq!(slugify(&title).len(), MAX_SLUG_LENGTH);

        let title = format!("{} tail", "b".repeat(99));
        let slug = slugify(&title);
        assert_eq!(slug, "b".repeat(99));

        let title = format!("{}_b", "c".repeat(99));
        assert_eq!(slugify(&title), "c".repeat(99));
    }

    #[test]
    fn test_slugify_empty_when_nothing_usable() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!! ???"), "");
    }

    #[test]
    fn test_has_valid_slug_chars() {
        assert!(has_valid_slug_chars("note-1_a"));
        assert!(has_valid_slug_chars(""));
        assert!(!has_valid_slug_chars("with space"));
        assert!(!has_valid_slug_chars("заметка"));
        assert!(!has_valid_slug_chars("a/b"));
    }
}
