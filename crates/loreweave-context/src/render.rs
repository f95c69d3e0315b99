//! Deterministic markdown rendering.
//!
//! Fixed section order: world info first, then reference documents. Each
//! entry renders with its title, keys, and tiered content; each document
//! with its title, path, and full content. Empty sections carry a labeled
//! placeholder instead of disappearing, so the output always explains
//! itself.

use loreweave_core::{Document, Entry};

use crate::budget::tier_content;
use crate::types::ContentTier;

/// World-info section header, including trailing blank line.
pub(crate) const WORLD_INFO_HEADER: &str = "## World Info\n\n";
/// Documents section header, including trailing blank line.
pub(crate) const DOCUMENTS_HEADER: &str = "## Reference Documents\n\n";
/// Placeholder rendered when no entries were selected.
pub(crate) const NO_ENTRIES_PLACEHOLDER: &str = "_no matching entries_\n";
/// Placeholder rendered when no documents were selected.
pub(crate) const NO_DOCUMENTS_PLACEHOLDER: &str = "_no matching documents_\n";

/// Render one entry section at the given tier.
pub(crate) fn entry_section(entry: &Entry, tier: ContentTier) -> String {
    let mut section = format!("### {}\n", entry.title);
    if !entry.primary_keywords.is_empty() {
        section.push_str("Keys: ");
        section.push_str(&entry.primary_keywords.join(", "));
        section.push('\n');
    }
    section.push_str(&tier_content(&entry.content, tier));
    section.push_str("\n\n");
    section
}

/// Render one document section.
pub(crate) fn document_section(document: &Document) -> String {
    let mut section = format!("### {} ({})\n", document.title, document.path);
    section.push_str(&document.content);
    section.push_str("\n\n");
    section
}

/// Assemble the final rendering from pre-rendered sections.
pub(crate) fn render_context(entry_sections: &[String], document_sections: &[String]) -> String {
    let mut out = String::from(WORLD_INFO_HEADER);
    if entry_sections.is_empty() {
        out.push_str(NO_ENTRIES_PLACEHOLDER);
        out.push('\n');
    } else {
        for section in entry_sections {
            out.push_str(section);
        }
    }

    out.push_str(DOCUMENTS_HEADER);
    if document_sections.is_empty() {
        out.push_str(NO_DOCUMENTS_PLACEHOLDER);
    } else {
        for section in document_sections {
            out.push_str(section);
        }
    }

    let mut rendered = out.trim_end().to_string();
    rendered.push('\n');
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use loreweave_core::{DocumentUid, EntryUid};

    fn entry(title: &str, keys: &[&str], content: &str) -> Entry {
        Entry {
            uid: EntryUid::new(1),
            title: title.to_string(),
            primary_keywords: keys.iter().map(|k| (*k).to_string()).collect(),
            content: content.to_string(),
            ..Entry::default()
        }
    }

    #[test]
    fn entry_section_has_title_keys_content() {
        let section = entry_section(
            &entry("Aurelia", &["aurelia", "queen"], "The golden queen."),
            ContentTier::Full,
        );
        assert_eq!(section, "### Aurelia\nKeys: aurelia, queen\nThe golden queen.\n\n");
    }

    #[test]
    fn entry_section_omits_empty_keys_line() {
        let section = entry_section(&entry("Aurelia", &[], "Text."), ContentTier::Full);
        assert_eq!(section, "### Aurelia\nText.\n\n");
    }

    #[test]
    fn entry_section_truncates_at_short_tier() {
        let long = "word ".repeat(200);
        let section = entry_section(&entry("Aurelia", &[], &long), ContentTier::Short);
        assert!(section.contains('…'));
        assert!(section.len() < long.len());
    }

    #[test]
    fn document_section_has_title_path_content() {
        let document = Document {
            uid: DocumentUid::new(1),
            title: "North".to_string(),
            path: "world/north.md".to_string(),
            content: "Snow.".to_string(),
            scope: "world".to_string(),
        };
        assert_eq!(
            document_section(&document),
            "### North (world/north.md)\nSnow.\n\n"
        );
    }

    #[test]
    fn empty_render_carries_placeholders() {
        let rendered = render_context(&[], &[]);
        assert!(rendered.starts_with("## World Info"));
        assert!(rendered.contains("_no matching entries_"));
        assert!(rendered.contains("## Reference Documents"));
        assert!(rendered.ends_with("_no matching documents_\n"));
    }

    #[test]
    fn sections_render_in_fixed_order() {
        let entry_sections = vec![entry_section(&entry("A", &[], "a"), ContentTier::Full)];
        let document_sections = vec!["### D (d.md)\nd\n\n".to_string()];
        let rendered = render_context(&entry_sections, &document_sections);
        let world = rendered.find("## World Info").unwrap();
        let docs = rendered.find("## Reference Documents").unwrap();
        assert!(world < docs);
    }
}
