//! Table output

use tabled::{
    Table, Tabled,
    builder::Builder,
    settings::{Alignment, Style, object::Rows},
};

/// Printed instead of an empty member table
pub const NO_MEMBERS: &str = "No members found.";

/// One row per record, rounded borders, centred header
pub fn format_table<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return NO_MEMBERS.to_string();
    }

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Rows::first(), Alignment::center());
    table.to_string()
}

/// Label/value pairs as a two-column table with no header row
pub fn format_fields(fields: &[(&str, String)]) -> String {
    let mut builder = Builder::default();
    for (label, value) in fields {
        builder.push_record([label.to_string(), value.clone()]);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::Member;
    use crate::models::MemberDisplay;
    use crate::session::Role;

    fn row(id: &str, name: &str, role: Option<Role>) -> MemberDisplay {
        MemberDisplay::from(Member {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", id),
            phone_number: "5551234567".to_string(),
            role,
        })
    }

    #[test]
    fn test_empty_member_table() {
        let rows: Vec<MemberDisplay> = Vec::new();
        assert_eq!(format_table(&rows), NO_MEMBERS);
    }

    #[test]
    fn test_member_table() {
        let table = format_table(&[row("m1", "Ada", Some(Role::Admin)), row("m2", "Grace", None)]);

        assert!(table.starts_with('╭'));
        for header in ["MEMBER ID", "NAME", "EMAIL", "PHONE", "ROLE"] {
            assert!(table.contains(header), "missing {header}");
        }
        assert!(table.contains("m2@example.com"));
        assert!(table.contains("admin"));
        assert!(table.contains("--"));
    }

    #[test]
    fn test_fields_table() {
        let table = format_fields(&[
            ("Logged in", "yes".to_string()),
            ("Role", "admin".to_string()),
        ]);

        let lines: Vec<&str> = table.lines().collect();
        assert!(lines.iter().any(|l| l.contains("Logged in") && l.contains("yes")));
        assert!(lines.iter().any(|l| l.contains("Role") && l.contains("admin")));
        assert!(table.contains('╰'));
    }
}
