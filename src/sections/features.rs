//! Features: an ordered list of features, each with its own questions.
//!
//! A feature's fields are stored under `<number>|<field>` keys, where the
//! number is the feature's 1-based position. Deleting a feature shifts the
//! ones after it down, so their fields are rewritten and the vacated slot is
//! blanked; loading skips slots whose name is blank.

use super::crud::{self, split_lines, Labels, ListEditor, TextList};
use super::markdown::{bullet_list, centered_image};
use super::question::{non_blank, run_questions, Question};
use super::{DocumentInfo, Section, SectionContext, SectionKind, SECTION_MARKER};
use crate::store::Record;
use crate::terminal::Menu;
use anyhow::Result;
use std::any::Any;
use std::collections::BTreeMap;
use tracing::{debug, warn};

const NAME: &str = "feature_name";
const POINTS: &str = "point_of_note";
const IMAGE_PATH: &str = "image_path";
const IMAGE_ALT: &str = "image_alt";
const FIELDS: [&str; 4] = [NAME, POINTS, IMAGE_PATH, IMAGE_ALT];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feature {
    /// 1-based slot in the store.
    pub number: usize,
    pub name: String,
    pub points_of_note: Vec<String>,
    pub image_path: String,
    pub image_alt: String,
}

impl Feature {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }

    fn key(&self, field: &str) -> String {
        format!("{}|{field}", self.number)
    }

    fn creation_questions() -> Vec<Question<Self>> {
        vec![
            Question::<Self>::custom("Feature title:", |f, ctx| {
                let name = ctx.terminal.process_menu(&Menu::free_text("Feature title:"))?;
                f.set_name(name, ctx)
            }),
            Question::<Self>::custom("Points of note", Self::ask_points),
            Question::answer("Path to the feature image:", Self::set_image_path),
            Question::answer("Alt text for the feature image:", Self::set_image_alt),
        ]
    }

    fn edit_questions() -> Vec<Question<Self>> {
        vec![
            Question::answer("Feature title:", Self::set_name).with_preview(|f| f.name.clone()),
            Question::<Self>::custom("Points of note", |f, ctx| {
                let field = f.key(POINTS);
                crud::manage(
                    &mut TextList {
                        items: &mut f.points_of_note,
                        field,
                        labels: Labels {
                            singular: "point",
                            plural: "points of note",
                        },
                        multiline_add: false,
                    },
                    ctx,
                )
            }),
            Question::answer("Path to the feature image:", Self::set_image_path)
                .with_preview(|f| f.image_path.clone()),
            Question::answer("Alt text for the feature image:", Self::set_image_alt)
                .with_preview(|f| f.image_alt.clone()),
        ]
    }

    fn set_name(&mut self, answer: String, ctx: &mut SectionContext<'_>) -> Result<()> {
        if let Some(name) = non_blank(&answer) {
            ctx.write_field(&self.key(NAME), &name)?;
            self.name = name;
        }
        Ok(())
    }

    fn set_image_path(&mut self, answer: String, ctx: &mut SectionContext<'_>) -> Result<()> {
        if let Some(path) = non_blank(&answer) {
            ctx.write_field(&self.key(IMAGE_PATH), &path)?;
            self.image_path = path;
        }
        Ok(())
    }

    fn set_image_alt(&mut self, answer: String, ctx: &mut SectionContext<'_>) -> Result<()> {
        if let Some(alt) = non_blank(&answer) {
            ctx.write_field(&self.key(IMAGE_ALT), &alt)?;
            self.image_alt = alt;
        }
        Ok(())
    }

    /// Collect points one at a time until the user declines another.
    fn ask_points(&mut self, ctx: &mut SectionContext<'_>) -> Result<()> {
        loop {
            let answer = ctx.terminal.ask("Please enter a point of note for this feature:")?;
            if let Some(point) = non_blank(&answer) {
                self.points_of_note.push(point);
            }
            if !ctx.terminal.confirm("Add another point?")? {
                break;
            }
        }
        if self.points_of_note.is_empty() {
            return Ok(());
        }
        ctx.write_field(&self.key(POINTS), &self.points_of_note.join("\n"))
    }

    /// Write every field under the current number.
    fn persist(&self, ctx: &mut SectionContext<'_>) -> Result<()> {
        ctx.write_field(&self.key(NAME), &self.name)?;
        ctx.write_field(&self.key(POINTS), &self.points_of_note.join("\n"))?;
        ctx.write_field(&self.key(IMAGE_PATH), &self.image_path)?;
        ctx.write_field(&self.key(IMAGE_ALT), &self.image_alt)
    }

    fn set_field(&mut self, field: &str, value: &str) -> bool {
        match field {
            NAME => self.name = value.to_string(),
            POINTS => self.points_of_note = split_lines(value),
            IMAGE_PATH => self.image_path = value.to_string(),
            IMAGE_ALT => self.image_alt = value.to_string(),
            _ => return false,
        }
        true
    }

    pub fn output_raw(&self, doc: &DocumentInfo) -> String {
        let mut output = format!("### {}\n\n", self.name);
        output.push_str(&bullet_list(&self.points_of_note));
        if !self.image_path.is_empty() {
            if !self.points_of_note.is_empty() {
                output.push('\n');
            }
            output.push_str(&centered_image(
                &doc.image_url(&self.image_path),
                &self.image_alt,
            ));
            output.push('\n');
        }
        output.push('\n');
        output
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeaturesSection {
    pub features: Vec<Feature>,
}

impl FeaturesSection {
    fn next_number(&self) -> usize {
        self.features.iter().map(|f| f.number).max().unwrap_or(0) + 1
    }
}

impl ListEditor for FeaturesSection {
    fn labels(&self) -> Labels {
        Labels {
            singular: "feature",
            plural: "features",
        }
    }

    fn len(&self) -> usize {
        self.features.len()
    }

    fn summary(&self, index: usize) -> String {
        self.features[index].name.clone()
    }

    fn detail(&self, index: usize) -> String {
        let feature = &self.features[index];
        let mut detail = format!("{}\n{}", feature.name, bullet_list(&feature.points_of_note));
        if !feature.image_path.is_empty() {
            detail.push_str(&format!("Image: {} ({})", feature.image_path, feature.image_alt));
        }
        detail
    }

    fn add(&mut self, ctx: &mut SectionContext<'_>) -> Result<()> {
        let mut feature = Feature::new(self.next_number());
        run_questions(&mut feature, &Feature::creation_questions(), ctx)?;
        self.features.push(feature);
        Ok(())
    }

    fn edit(&mut self, index: usize, ctx: &mut SectionContext<'_>) -> Result<()> {
        run_questions(&mut self.features[index], &Feature::edit_questions(), ctx)
    }

    fn delete(&mut self, index: usize, ctx: &mut SectionContext<'_>) -> Result<()> {
        let removed = self.features.remove(index);
        let mut vacated: Vec<usize> = self.features.iter().map(|f| f.number).collect();
        vacated.push(removed.number);

        for (position, feature) in self.features.iter_mut().enumerate() {
            feature.number = position + 1;
        }
        for feature in &self.features {
            feature.persist(ctx)?;
        }

        vacated.retain(|n| *n > self.features.len());
        for number in vacated {
            for field in FIELDS {
                ctx.clear_field(&format!("{number}|{field}"))?;
            }
        }
        debug!(removed = %removed.name, remaining = self.features.len(), "deleted feature");
        Ok(())
    }
}

impl Section for FeaturesSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Features
    }

    fn display_menu(&mut self, ctx: &mut SectionContext<'_>) -> Result<()> {
        crud::manage(self, ctx)
    }

    fn output_raw(&self, doc: &DocumentInfo) -> String {
        let mut output = format!("## {}\n\n", self.header());
        for feature in &self.features {
            output.push_str(&feature.output_raw(doc));
        }
        output
    }

    fn load_section(&mut self, records: &[Record]) {
        let mut slots: BTreeMap<usize, Feature> = BTreeMap::new();
        for record in records {
            if record.data_type == SECTION_MARKER {
                continue;
            }
            let parsed = record
                .data_type
                .split_once('|')
                .and_then(|(n, field)| Some((n.parse::<usize>().ok()?, field)));
            let Some((number, field)) = parsed else {
                warn!(data_type = %record.data_type, "skipping unknown features row");
                continue;
            };
            let feature = slots.entry(number).or_insert_with(|| Feature::new(number));
            if !feature.set_field(field, &record.value) {
                warn!(data_type = %record.data_type, "skipping unknown feature field");
            }
        }

        self.features = slots
            .into_values()
            .filter(|f| !f.name.trim().is_empty())
            .collect();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryWorkbook, Workbook, Worksheet};
    use crate::terminal::{ScriptedLines, Terminal};

    fn feature(number: usize, name: &str, points: &[&str]) -> Feature {
        Feature {
            number,
            name: name.to_string(),
            points_of_note: points.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    fn run(
        section: &mut FeaturesSection,
        sheet: &mut dyn Worksheet,
        script: ScriptedLines,
    ) -> Result<()> {
        let doc = DocumentInfo::new("Demo");
        let mut terminal = Terminal::scripted(script);
        let mut ctx = SectionContext::new(&mut terminal, sheet, &doc, "Features");
        section.display_menu(&mut ctx)
    }

    fn reload(sheet: &dyn Worksheet) -> Result<FeaturesSection> {
        let mut section = FeaturesSection::default();
        section.load_section(&sheet.records()?);
        Ok(section)
    }

    #[test]
    fn test_empty_section_renders_header_only() {
        let out = FeaturesSection::default().output_raw(&DocumentInfo::new("Demo"));
        assert_eq!(out, "## Features\n\n");
    }

    #[test]
    fn test_feature_rendering() {
        let mut search = feature(1, "Search", &["fast", "typo tolerant"]);
        search.image_path = "search.png".to_string();
        search.image_alt = "Search box".to_string();
        let doc = DocumentInfo::new("Demo").with_image_base_path("docs");

        assert_eq!(
            search.output_raw(&doc),
            "### Search\n\n * Fast\n * Typo tolerant\n\n\
             <p align=\"center\"><img src=\"docs/search.png\" width=\"50%\" height=\"50%\" alt=\"Search box\"></p>\n\n"
        );
        assert_eq!(
            feature(2, "Export", &[]).output_raw(&doc),
            "### Export\n\n\n"
        );
    }

    #[test]
    fn test_add_feature_asks_every_question() -> Result<()> {
        let mut workbook = MemoryWorkbook::default();
        let mut sheet = workbook.open("Demo")?;
        let script = ScriptedLines::new([
            "1", "  ", "Search", "fast", "y", "typo tolerant", "n", "search.png", "Search box", "5",
        ]);
        let mut section = FeaturesSection::default();
        run(&mut section, sheet.as_mut(), script)?;

        let mut expected = feature(1, "Search", &["fast", "typo tolerant"]);
        expected.image_path = "search.png".to_string();
        expected.image_alt = "Search box".to_string();
        assert_eq!(section.features, vec![expected]);
        assert_eq!(reload(sheet.as_ref())?, section);
        Ok(())
    }

    #[test]
    fn test_add_then_delete_restores_features() -> Result<()> {
        let mut workbook = MemoryWorkbook::default();
        let mut sheet = workbook.open("Demo")?;
        let mut section = FeaturesSection::default();
        run(
            &mut section,
            sheet.as_mut(),
            ScriptedLines::new(["1", "Search", "fast", "n", "", "", "5"]),
        )?;
        let before = section.clone();

        run(
            &mut section,
            sheet.as_mut(),
            ScriptedLines::new(["1", "Export", "csv", "n", "", "", "4", "2", "y", "5"]),
        )?;
        assert_eq!(section, before);
        assert_eq!(reload(sheet.as_ref())?, before);
        Ok(())
    }

    #[test]
    fn test_delete_renumbers_and_blanks_trailing_slot() -> Result<()> {
        let mut workbook = MemoryWorkbook::default();
        let mut sheet = workbook.open("Demo")?;
        let mut section = FeaturesSection::default();
        run(
            &mut section,
            sheet.as_mut(),
            ScriptedLines::new([
                "1", "Search", "fast", "n", "", "", "1", "Export", "csv", "n", "export.png", "",
                "4", "1", "y", "5",
            ]),
        )?;

        let mut export = feature(1, "Export", &["csv"]);
        export.image_path = "export.png".to_string();
        assert_eq!(section.features, vec![export]);

        let records = sheet.records()?;
        assert!(records.contains(&Record::new("Features", "1|feature_name", "Export")));
        assert!(records.contains(&Record::new("Features", "2|feature_name", "")));
        assert_eq!(reload(sheet.as_ref())?, section);
        Ok(())
    }

    #[test]
    fn test_edit_points_through_nested_menu() -> Result<()> {
        let mut workbook = MemoryWorkbook::default();
        let mut sheet = workbook.open("Demo")?;
        let mut section = FeaturesSection {
            features: vec![feature(1, "Search", &["fast"])],
        };
        // Edit feature 1: keep title, add a point, keep image fields.
        let script = ScriptedLines::new([
            "2", "1", "y", "", "1", "offline", "5", "", "", "5",
        ]);
        run(&mut section, sheet.as_mut(), script)?;

        assert_eq!(section.features[0].points_of_note, vec!["fast", "offline"]);
        assert_eq!(
            sheet.records()?,
            vec![Record::new("Features", "1|point_of_note", "fast\noffline")]
        );
        Ok(())
    }

    #[test]
    fn test_load_skips_blank_slots_and_is_idempotent() {
        let records = vec![
            Record::new("Features", "section_added", "2026-01-01T00:00:00+00:00"),
            Record::new("Features", "1|feature_name", "Search"),
            Record::new("Features", "1|point_of_note", "fast\n\ntypo tolerant"),
            Record::new("Features", "2|feature_name", ""),
            Record::new("Features", "2|point_of_note", ""),
            Record::new("Features", "1|image_path", "search.png"),
            Record::new("Features", "1|colour", "red"),
            Record::new("Features", "stray", "x"),
        ];
        let mut section = FeaturesSection::default();
        section.load_section(&records);

        let mut search = feature(1, "Search", &["fast", "typo tolerant"]);
        search.image_path = "search.png".to_string();
        assert_eq!(section.features, vec![search.clone()]);

        section.load_section(&records);
        assert_eq!(section.features, vec![search]);
    }

    #[test]
    fn test_add_after_gap_uses_next_free_number() {
        let section = FeaturesSection {
            features: vec![feature(1, "A", &[]), feature(3, "C", &[])],
        };
        assert_eq!(section.next_number(), 4);
    }
}
