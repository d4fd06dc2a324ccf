//! Category display formatting

use crate::models::{Category, Kind};

/// Format categories as a tree grouped by kind
pub fn format_category_tree(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'budget init' to create default categories.\n"
            .to_string();
    }

    let mut output = String::new();

    for (i, kind) in Kind::all().iter().enumerate() {
        let in_kind: Vec<_> = categories.iter().filter(|c| c.kind == *kind).collect();

        output.push_str(&format!("{}\n", kind.label()));
        if in_kind.is_empty() {
            output.push_str("  (no categories)\n");
        } else {
            for (j, category) in in_kind.iter().enumerate() {
                let prefix = if j == in_kind.len() - 1 { "└── " } else { "├── " };
                output.push_str(&format!("  {}{:<24} {}\n", prefix, category.name, category.id));
            }
        }

        if i < Kind::all().len() - 1 {
            output.push('\n');
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryId;

    #[test]
    fn test_format_category_tree() {
        let categories = vec![
            Category::new(CategoryId::new(1), "Food", Kind::Expense),
            Category::new(CategoryId::new(2), "Rent", Kind::Expense),
        ];

        let output = format_category_tree(&categories);
        assert!(output.contains("Expense\n  ├── Food"));
        assert!(output.contains("└── Rent"));
        assert!(output.contains("cat-2"));
        assert!(output.contains("Income\n  (no categories)"));
    }

    #[test]
    fn test_empty_tree() {
        assert!(format_category_tree(&[]).contains("budget init"));
    }
}
