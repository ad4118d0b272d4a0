//! User Experience: aims, audience, user stories and the flowchart.
//!
//! Unlike the other sections this one is a hub: the user picks which
//! attribute to manage and comes back to the hub afterwards.

use super::crud::{self, Labels, ListEditor, TextList};
use super::markdown::{bullet_list, github_table};
use super::question::{ask, non_blank, Question};
use super::{DocumentInfo, Section, SectionContext, SectionKind};
use crate::store::Record;
use crate::terminal::Menu;
use anyhow::Result;
use std::any::Any;
use tracing::warn;

const HUB_LABELS: [&str; 4] = [
    "Manage Site Aims",
    "Manage Target Audience",
    "Manage User Stories",
    "Manage Flowchart Image Path",
];

/// One row of the user stories table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStory {
    pub goal: String,
    pub action: String,
}

impl UserStory {
    /// `goal|action`, the persisted form. The goal never contains `|`.
    fn encode(&self) -> String {
        format!("{}|{}", self.goal, self.action)
    }

    fn decode(line: &str) -> Option<Self> {
        let (goal, action) = line.split_once('|')?;
        Some(Self {
            goal: goal.to_string(),
            action: action.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserExperienceSection {
    pub site_aims: Vec<String>,
    pub target_audience: Vec<String>,
    pub user_stories: Vec<UserStory>,
    pub flowchart: String,
}

impl UserExperienceSection {
    fn questions() -> Vec<Question<Self>> {
        vec![
            Question::<Self>::custom("Site Aims", |s, ctx| {
                crud::manage(
                    &mut TextList {
                        items: &mut s.site_aims,
                        field: "site_aims".to_string(),
                        labels: Labels {
                            singular: "site aim",
                            plural: "site aims",
                        },
                        multiline_add: true,
                    },
                    ctx,
                )
            }),
            Question::<Self>::custom("Target Audience", |s, ctx| {
                crud::manage(
                    &mut TextList {
                        items: &mut s.target_audience,
                        field: "target_audience".to_string(),
                        labels: Labels {
                            singular: "target audience",
                            plural: "target audiences",
                        },
                        multiline_add: true,
                    },
                    ctx,
                )
            }),
            Question::<Self>::custom("User Stories", |s, ctx| {
                crud::manage(&mut StoryList(&mut s.user_stories), ctx)
            }),
            Question::answer(
                "Please enter the file name of your flowchart image:",
                Self::set_flowchart,
            )
            .with_preview(|s| s.flowchart.clone()),
        ]
    }

    fn set_flowchart(&mut self, answer: String, ctx: &mut SectionContext<'_>) -> Result<()> {
        if let Some(file) = non_blank(&answer) {
            ctx.write_field("flowchart", &file)?;
            self.flowchart = file;
        }
        Ok(())
    }

    pub fn output_site_aims(&self) -> String {
        format!("### Site Aims\n\n{}", bullet_list(&self.site_aims))
    }

    pub fn output_target_audience(&self) -> String {
        format!("### Target Audience\n\n{}", bullet_list(&self.target_audience))
    }

    pub fn output_user_stories(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .user_stories
            .iter()
            .enumerate()
            .map(|(i, story)| vec![(i + 1).to_string(), story.goal.clone(), story.action.clone()])
            .collect();
        format!(
            "### User Stories\n\n{}",
            github_table(&["ID", "GOAL", "ACTION"], &rows)
        )
    }

    /// Empty when no flowchart was given.
    pub fn output_flowchart(&self, doc: &DocumentInfo) -> String {
        if self.flowchart.is_empty() {
            return String::new();
        }
        format!(
            "### Flowchart\n\n![{} Flowchart]({})\n",
            doc.title,
            doc.image_url(&self.flowchart)
        )
    }
}

impl Section for UserExperienceSection {
    fn kind(&self) -> SectionKind {
        SectionKind::UserExperience
    }

    fn display_menu(&mut self, ctx: &mut SectionContext<'_>) -> Result<()> {
        let questions = Self::questions();
        let menu = Menu::choice(
            format!("{}:", self.header()),
            HUB_LABELS
                .iter()
                .enumerate()
                .map(|(i, label)| (*label, Some(i)))
                .chain([("Return", None)]),
        )?;

        loop {
            match *ctx.terminal.choose(&menu)? {
                Some(i) => ask(self, &questions[i], ctx)?,
                None => return Ok(()),
            }
        }
    }

    fn output_raw(&self, doc: &DocumentInfo) -> String {
        let mut output = format!("## {}\n\n", self.header());
        for part in [
            self.output_site_aims(),
            self.output_target_audience(),
            self.output_user_stories(),
            self.output_flowchart(doc),
        ] {
            if !part.is_empty() {
                output.push_str(&part);
                output.push('\n');
            }
        }
        output
    }

    fn load_section(&mut self, records: &[Record]) {
        *self = Self::default();
        for record in records {
            let value = record.value.as_str();
            match record.data_type.as_str() {
                "site_aims" => self.site_aims = crud::split_lines(value),
                "target_audience" => self.target_audience = crud::split_lines(value),
                "user_stories" => {
                    self.user_stories = value
                        .lines()
                        .filter(|line| !line.trim().is_empty())
                        .filter_map(|line| {
                            let story = UserStory::decode(line);
                            if story.is_none() {
                                warn!(line, "skipping malformed user story");
                            }
                            story
                        })
                        .collect();
                }
                "flowchart" => self.flowchart = value.to_string(),
                super::SECTION_MARKER => {}
                other => warn!(data_type = other, "skipping unknown user experience row"),
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// CRUD access to the user stories, persisted as `goal|action` lines.
struct StoryList<'a>(&'a mut Vec<UserStory>);

impl StoryList<'_> {
    fn persist(&self, ctx: &mut SectionContext<'_>) -> Result<()> {
        let encoded: Vec<String> = self.0.iter().map(UserStory::encode).collect();
        ctx.write_field("user_stories", &encoded.join("\n"))
    }

    fn ask_action(ctx: &mut SectionContext<'_>) -> Result<Option<String>> {
        let answer = ctx.terminal.ask("What is the action of this story?")?;
        Ok(non_blank(&answer))
    }

    fn ask_goal(ctx: &mut SectionContext<'_>) -> Result<Option<String>> {
        let answer = ctx.terminal.ask("What is the goal of this story?")?;
        Ok(non_blank(&answer).map(|goal| goal.replace('|', "/")))
    }
}

impl ListEditor for StoryList<'_> {
    fn labels(&self) -> Labels {
        Labels {
            singular: "story",
            plural: "user stories",
        }
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn summary(&self, index: usize) -> String {
        self.0[index].goal.clone()
    }

    fn detail(&self, index: usize) -> String {
        let story = &self.0[index];
        format!("Goal:\n{}\nAction:\n{}", story.goal, story.action)
    }

    fn add(&mut self, ctx: &mut SectionContext<'_>) -> Result<()> {
        ctx.terminal.clear()?;
        let Some(action) = Self::ask_action(ctx)? else {
            return Ok(());
        };
        let Some(goal) = Self::ask_goal(ctx)? else {
            return Ok(());
        };
        self.0.push(UserStory { goal, action });
        self.persist(ctx)
    }

    fn edit(&mut self, index: usize, ctx: &mut SectionContext<'_>) -> Result<()> {
        ctx.terminal.clear()?;
        ctx.terminal.show_current(&self.0[index].action)?;
        let action = Self::ask_action(ctx)?;

        ctx.terminal.show_current(&self.0[index].goal)?;
        let goal = Self::ask_goal(ctx)?;

        if action.is_none() && goal.is_none() {
            return Ok(());
        }
        let story = &mut self.0[index];
        if let Some(action) = action {
            story.action = action;
        }
        if let Some(goal) = goal {
            story.goal = goal;
        }
        self.persist(ctx)
    }

    fn delete(&mut self, index: usize, ctx: &mut SectionContext<'_>) -> Result<()> {
        self.0.remove(index);
        self.persist(ctx)
    }
}
