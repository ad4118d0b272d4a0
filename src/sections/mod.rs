//! README sections.
//!
//! A section collects answers through declarative [`question::Question`]s,
//! persists each answer under its header, renders itself as Markdown and can
//! be rebuilt from persisted rows. Sections never hold a reference to the
//! README that owns them; what they need is passed in:
//!
//! - [`DocumentInfo`] when rendering (title, image base path)
//! - [`SectionContext`] when interacting (terminal, worksheet, header)

pub mod crud;
pub mod features;
pub mod intro;
pub mod markdown;
pub mod question;
pub mod user_experience;

pub use features::{Feature, FeaturesSection};
pub use intro::IntroductionSection;
pub use user_experience::{UserExperienceSection, UserStory};

use crate::store::{self, Record, Worksheet};
use crate::terminal::Terminal;
use anyhow::Result;
use chrono::Utc;
use std::any::Any;

/// Data type of the row written when a section is first added.
pub const SECTION_MARKER: &str = "section_added";

/// The closed set of section kinds, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Introduction,
    UserExperience,
    Features,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [
        SectionKind::Introduction,
        SectionKind::UserExperience,
        SectionKind::Features,
    ];

    /// Header used in menus, in rendered Markdown and as the stored section type.
    pub fn header(self) -> &'static str {
        match self {
            SectionKind::Introduction => "Introduction",
            SectionKind::UserExperience => "User Experience",
            SectionKind::Features => "Features",
        }
    }

    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.header() == header)
    }

    /// A fresh, empty section of this kind.
    pub fn build(self) -> Box<dyn Section> {
        match self {
            SectionKind::Introduction => Box::new(IntroductionSection::default()),
            SectionKind::UserExperience => Box::new(UserExperienceSection::default()),
            SectionKind::Features => Box::new(FeaturesSection::default()),
        }
    }
}

pub trait Section {
    fn kind(&self) -> SectionKind;

    fn header(&self) -> &'static str {
        self.kind().header()
    }

    /// Walk the user through this section's questions.
    fn display_menu(&mut self, ctx: &mut SectionContext<'_>) -> Result<()>;

    /// Markdown fragment for this section.
    fn output_raw(&self, doc: &DocumentInfo) -> String;

    /// Replace every attribute with what `records` hold.
    ///
    /// `records` are this section's rows only. Loading never writes back.
    fn load_section(&mut self, records: &[Record]);

    fn as_any(&self) -> &dyn Any;
}

impl<'s> dyn Section + 's {
    pub fn downcast_ref<T: Section + 'static>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// README-level facts a section needs to render itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: String,
    /// Prefix for relative image files, e.g. `assets/images`.
    pub image_base_path: String,
}

impl DocumentInfo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            image_base_path: String::new(),
        }
    }

    pub fn with_image_base_path(mut self, base: impl Into<String>) -> Self {
        self.image_base_path = base.into();
        self
    }

    /// `file` under the image base path, or `file` itself without one.
    pub fn image_url(&self, file: &str) -> String {
        let base = self.image_base_path.trim_end_matches('/');
        if base.is_empty() {
            file.to_string()
        } else {
            format!("{base}/{file}")
        }
    }
}

/// Everything a section touches while the user edits it.
pub struct SectionContext<'a> {
    pub terminal: &'a mut Terminal,
    pub doc: &'a DocumentInfo,
    sheet: &'a mut dyn Worksheet,
    header: &'static str,
}

impl<'a> SectionContext<'a> {
    pub fn new(
        terminal: &'a mut Terminal,
        sheet: &'a mut dyn Worksheet,
        doc: &'a DocumentInfo,
        header: &'static str,
    ) -> Self {
        Self {
            terminal,
            doc,
            sheet,
            header,
        }
    }

    pub fn header(&self) -> &'static str {
        self.header
    }

    /// Persist `value` for `field` under this section's header.
    pub fn write_field(&mut self, field: &str, value: &str) -> Result<()> {
        store::write_field(&mut *self.sheet, self.header, field, value)
    }

    /// Blank a previously written `field`, if any.
    pub fn clear_field(&mut self, field: &str) -> Result<()> {
        store::clear_field(&mut *self.sheet, self.header, field)
    }

    /// Record that this section was added to the README.
    pub fn mark_added(&mut self) -> Result<()> {
        self.write_field(SECTION_MARKER, &Utc::now().to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_round_trips_headers() {
        for kind in SectionKind::ALL {
            assert_eq!(SectionKind::from_header(kind.header()), Some(kind));
            assert_eq!(kind.build().kind(), kind);
        }
        assert_eq!(SectionKind::from_header("Deployment"), None);
        assert_eq!(SectionKind::from_header("introduction"), None);
    }

    #[test]
    fn test_image_url() {
        let doc = DocumentInfo::new("Demo");
        assert_eq!(doc.image_url("flow.png"), "flow.png");

        let doc = doc.with_image_base_path("assets/images/");
        assert_eq!(doc.image_url("flow.png"), "assets/images/flow.png");
    }

    #[test]
    fn test_downcast_to_concrete_section() {
        let section = SectionKind::Features.build();
        assert!(section.downcast_ref::<FeaturesSection>().is_some());
        assert!(section.downcast_ref::<IntroductionSection>().is_none());
    }
}
