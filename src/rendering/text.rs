//! Console text rendering.

use crate::models::Record;

/// Renders records in their aligned text form, separated by blank lines.
#[must_use]
pub fn render_text<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_separates_records() {
        let records = [Record::new("A", "B", "C"), Record::new("D", "E", "F")];
        let text = render_text(&records);

        assert_eq!(text.matches("name:").count(), 2);
        assert!(text.contains("C\n\nname:"));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_render_text_empty() {
        assert_eq!(render_text(&Vec::<Record>::new()), "");
    }
}
