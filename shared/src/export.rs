//! Guest list projections for spreadsheet export and printing.

use chrono::NaiveDate;
use serde::Serialize;

use crate::aggregation::{effective_events, EventFilter};
use crate::config::EventCatalog;
use crate::error::ExportError;
use crate::models::{Family, Member};

/// Event label printed for families that have no events at all.
pub const NO_EVENT_LABEL: &str = "Not Set";

const FIXED_COLUMNS: [&str; 3] = ["Family Name", "Member Name", "Gender"];

/// One exported spreadsheet row: a single member with a Yes/No flag per
/// catalog event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestListRow {
    pub family_name: String,
    pub member_name: String,
    pub gender: &'static str,
    pub invited: Vec<bool>,
}

impl GuestListRow {
    fn cells(&self) -> impl Iterator<Item = &str> {
        [
            self.family_name.as_str(),
            self.member_name.as_str(),
            self.gender,
        ]
        .into_iter()
        .chain(self.invited.iter().map(|i| if *i { "Yes" } else { "No" }))
    }
}

pub fn guest_list_rows(families: &[Family], catalog: &EventCatalog) -> Vec<GuestListRow> {
    families
        .iter()
        .flat_map(|family| {
            let events = effective_events(family);
            let invited: Vec<bool> = catalog.events().iter().map(|e| events.contains(e)).collect();

            family.members.iter().map(move |member| GuestListRow {
                family_name: family.family_name.clone(),
                member_name: member.name.clone(),
                gender: member.gender.display_name(),
                invited: invited.clone(),
            })
        })
        .collect()
}

/// Renders the guest list as CSV with a header row and CRLF line endings.
pub fn guest_list_csv(families: &[Family], catalog: &EventCatalog) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(vec![]);

    writer.write_record(
        FIXED_COLUMNS
            .iter()
            .copied()
            .chain(catalog.events().iter().map(|e| e.as_str())),
    )?;
    for row in guest_list_rows(families, catalog) {
        writer.write_record(row.cells())?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}

/// e.g. `Guest-List-Marriage-morning-2024-02-14.csv`
pub fn export_file_name(filter: &EventFilter, date: NaiveDate) -> String {
    let suffix = match filter.tag() {
        Some(tag) => format!(
            "-{}",
            tag.as_str().split_whitespace().collect::<Vec<_>>().join("-")
        ),
        None => String::new(),
    };
    format!("Guest-List{}-{}.csv", suffix, date.format("%Y-%m-%d"))
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrintRow {
    pub family: String,
    pub event: String,
    pub members: Vec<Member>,
    pub member_count: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrintSheet {
    pub filter: String,
    pub total_families: usize,
    pub total_guests: usize,
    pub rows: Vec<PrintRow>,
}

/// Printable guest list with one row per family and event.
///
/// With an event filter only the matching event is listed for each family.
/// Families are expected to be pre-filtered and sorted.
pub fn print_sheet(families: &[Family], filter: &EventFilter) -> PrintSheet {
    let rows: Vec<PrintRow> = families
        .iter()
        .flat_map(|family| {
            let mut labels: Vec<String> = effective_events(family)
                .into_iter()
                .map(|e| e.to_string())
                .collect();
            if labels.is_empty() {
                labels.push(NO_EVENT_LABEL.to_string());
            }
            if let Some(tag) = filter.tag() {
                labels.retain(|l| l == tag.as_str());
            }

            labels.into_iter().map(move |event| PrintRow {
                family: family.family_name.clone(),
                event,
                members: family.members.clone(),
                member_count: family.members.len(),
            })
        })
        .collect();

    PrintSheet {
        filter: filter
            .tag()
            .map(|t| t.to_string())
            .unwrap_or_else(|| "All Events".to_string()),
        total_families: families.len(),
        total_guests: rows.iter().map(|r| r.member_count).sum(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn families() -> Vec<Family> {
        vec![
            Family::new("1", "Sharma, Delhi")
                .with_events(["Engagement", "Sangeet"])
                .with_member("Ravi", Gender::Male)
                .with_member("Priya \"Pia\"", Gender::Female),
            Family::new("2", "Kapoor")
                .with_legacy_event("Devkarya")
                .with_member("Anil", Gender::Male),
            Family::new("3", "Mehta").with_member("Neha", Gender::Female),
        ]
    }

    #[test]
    fn one_row_per_member_with_event_flags() {
        let rows = guest_list_rows(&families(), &EventCatalog::default());

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].gender, "Male");
        assert_eq!(rows[0].invited, vec![true, false, true, false, false]);
        assert_eq!(rows[2].member_name, "Anil");
        assert_eq!(rows[2].invited, vec![false, true, false, false, false]);
        assert_eq!(rows[3].invited, vec![false; 5]);
    }

    #[test]
    fn csv_has_header_and_quotes_fields() {
        let csv = guest_list_csv(&families(), &EventCatalog::default()).unwrap();
        let lines: Vec<&str> = csv.split("\r\n").collect();

        assert_eq!(
            lines[0],
            "Family Name,Member Name,Gender,Engagement,Devkarya,Sangeet,Marriage morning,Marriage afternoon reception"
        );
        assert_eq!(lines[1], "\"Sharma, Delhi\",Ravi,Male,Yes,No,Yes,No,No");
        assert_eq!(
            lines[2],
            "\"Sharma, Delhi\",\"Priya \"\"Pia\"\"\",Female,Yes,No,Yes,No,No"
        );
        assert_eq!(lines[3], "Kapoor,Anil,Male,No,Yes,No,No,No");
    }

    #[test]
    fn csv_quotes_embedded_newlines_and_ends_with_crlf() {
        let families = vec![Family::new("1", "Line\nBreak").with_member("Asha", Gender::Female)];
        let catalog = EventCatalog::new(["Sangeet"]).unwrap();
        let csv = guest_list_csv(&families, &catalog).unwrap();

        assert_eq!(
            csv,
            "Family Name,Member Name,Gender,Sangeet\r\n\"Line\nBreak\",Asha,Female,No\r\n"
        );
    }

    #[test]
    fn csv_of_empty_list_is_header_only() {
        let csv = guest_list_csv(&[], &EventCatalog::default()).unwrap();
        assert_eq!(csv.matches("\r\n").count(), 1);
        assert!(csv.starts_with("Family Name,Member Name,Gender,Engagement"));
    }

    #[test]
    fn file_name_includes_event_and_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 14).unwrap();
        assert_eq!(
            export_file_name(&EventFilter::All, date),
            "Guest-List-2024-02-14.csv"
        );
        assert_eq!(
            export_file_name(&EventFilter::Only("Marriage  morning".into()), date),
            "Guest-List-Marriage-morning-2024-02-14.csv"
        );
    }

    #[test]
    fn print_sheet_expands_events() {
        let sheet = print_sheet(&families(), &EventFilter::All);

        let rows: Vec<(&str, &str)> = sheet
            .rows
            .iter()
            .map(|r| (r.family.as_str(), r.event.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Sharma, Delhi", "Engagement"),
                ("Sharma, Delhi", "Sangeet"),
                ("Kapoor", "Devkarya"),
                ("Mehta", NO_EVENT_LABEL),
            ]
        );
        assert_eq!(sheet.filter, "All Events");
        assert_eq!(sheet.total_families, 3);
        assert_eq!(sheet.total_guests, 6);
    }

    #[test]
    fn print_sheet_keeps_only_filtered_event() {
        let sheet = print_sheet(&families()[..1], &EventFilter::Only("Sangeet".into()));

        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.rows[0].event, "Sangeet");
        assert_eq!(sheet.filter, "Sangeet");
        assert_eq!(sheet.total_guests, 2);
    }
}
