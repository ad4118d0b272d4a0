//! Introduction: what the project is and where to see it running.

use super::markdown::centered_image;
use super::question::{non_blank, run_questions, Question};
use super::{DocumentInfo, Section, SectionContext, SectionKind};
use crate::store::Record;
use anyhow::Result;
use std::any::Any;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntroductionSection {
    pub description: String,
    pub demo_link: String,
    pub intro_image_path: String,
}

impl IntroductionSection {
    fn questions() -> Vec<Question<Self>> {
        vec![
            Question::answer("Describe your project:", Self::set_description)
                .with_preview(|s| s.description.clone())
                .multiline(),
            Question::answer("Provide a demo link to your project:", Self::set_demo_link)
                .with_preview(|s| s.demo_link.clone()),
            Question::answer("Path to your intro image:", Self::set_intro_image_path)
                .with_preview(|s| s.intro_image_path.clone()),
        ]
    }

    fn set_description(&mut self, answer: String, ctx: &mut SectionContext<'_>) -> Result<()> {
        if let Some(description) = non_blank(&answer) {
            ctx.write_field("description", &description)?;
            self.description = description;
        }
        Ok(())
    }

    fn set_demo_link(&mut self, answer: String, ctx: &mut SectionContext<'_>) -> Result<()> {
        if let Some(link) = non_blank(&answer) {
            ctx.write_field("demo_link", &link)?;
            self.demo_link = link;
        }
        Ok(())
    }

    fn set_intro_image_path(&mut self, answer: String, ctx: &mut SectionContext<'_>) -> Result<()> {
        if let Some(path) = non_blank(&answer) {
            ctx.write_field("intro_image_path", &path)?;
            self.intro_image_path = path;
        }
        Ok(())
    }
}

impl Section for IntroductionSection {
    fn kind(&self) -> SectionKind {
        SectionKind::Introduction
    }

    fn display_menu(&mut self, ctx: &mut SectionContext<'_>) -> Result<()> {
        run_questions(self, &Self::questions(), ctx)
    }

    fn output_raw(&self, doc: &DocumentInfo) -> String {
        let mut output = format!("# {}\n\n## {}\n\n", doc.title, self.header());

        if !self.intro_image_path.is_empty() {
            output.push_str(&centered_image(
                &doc.image_url(&self.intro_image_path),
                &doc.title,
            ));
            output.push_str("\n\n");
        }
        if !self.description.is_empty() {
            output.push_str(&self.description);
            output.push_str("\n\n");
        }
        if !self.demo_link.is_empty() {
            output.push_str(&format!(
                "You can view the live project here: \
                 <a href='{}' target='_blank' rel='noopener'>{}</a>\n\n",
                self.demo_link, doc.title
            ));
        }
        output
    }

    fn load_section(&mut self, records: &[Record]) {
        *self = Self::default();
        for record in records {
            match record.data_type.as_str() {
                "description" => self.description = record.value.clone(),
                "demo_link" => self.demo_link = record.value.clone(),
                "intro_image_path" => self.intro_image_path = record.value.clone(),
                super::SECTION_MARKER => {}
                other => warn!(data_type = other, "skipping unknown introduction row"),
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
