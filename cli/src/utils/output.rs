use crate::argparse::OutputFormat;
use indexmap::IndexMap;
use tabular::{Row, Table};
use ticket_filter::{Field, Record, Report};

const TABLE_COLUMNS: [(&str, Field); 6] = [
    ("Id", Field::Id),
    ("Status", Field::Status),
    ("Issue type", Field::IssueType),
    ("City", Field::City),
    ("Submitted", Field::DateSubmitted),
    ("Address", Field::LocationAddress),
];

pub fn print_records(records: &[&Record], format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(records)?),
        OutputFormat::Yaml => print!("{}", serde_yaml_ng::to_string(records)?),
        OutputFormat::Table => {
            println!("Found {} matching tickets:", records.len());
            if !records.is_empty() {
                print!("{}", records_table(records));
            }
        }
    }
    Ok(())
}

fn records_table(records: &[&Record]) -> Table {
    let mut table = Table::new("{:<}  {:<}  {:<}  {:<}  {:<}  {:<}")
        .with_row(Row::from_cells(TABLE_COLUMNS.iter().map(|(title, _)| *title)));
    for record in records {
        let mut row = Row::new();
        for (_, field) in &TABLE_COLUMNS {
            row.add_cell(record.field(field).unwrap_or_default());
        }
        table.add_row(row);
    }
    table
}

pub fn print_report(report: &Report) {
    println!("Total tickets: {}", report.total);
    for (title, group) in [
        ("Status", &report.by_status),
        ("Issue type", &report.by_issue_type),
        ("City", &report.by_city),
    ] {
        println!();
        print!("{}", group_table(title, group));
    }
}

fn group_table(title: &str, group: &IndexMap<String, usize>) -> Table {
    let mut table =
        Table::new("{:<}  {:>}").with_row(Row::from_cells([title, "Tickets"].iter().cloned()));
    for (label, count) in Report::sorted_by_count(group) {
        table.add_row(Row::new().with_cell(label).with_cell(count));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_records_table_has_header_and_rows() {
        let records: Vec<Record> = [
            json!({"id": 1, "status": "Open", "location": "12 Main Street"}),
            json!({"id": 2, "issueType": "Graffiti"}),
        ]
        .into_iter()
        .map(Record::from_value)
        .collect();
        let refs: Vec<&Record> = records.iter().collect();

        let rendered = records_table(&refs).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Id"));
        assert!(lines[1].contains("12 Main Street"));
        assert!(lines[2].contains("Graffiti"));
    }

    #[test]
    fn test_group_table_sorted() {
        let mut group = IndexMap::new();
        group.insert("Closed".to_string(), 1);
        group.insert("Open".to_string(), 3);
        let rendered = group_table("Status", &group).to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[1].starts_with("Open"));
        assert!(lines[2].starts_with("Closed"));
    }
}
