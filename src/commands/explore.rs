//! Explore search over live course and note lists.

use clap::Args;

use campushub_core::error::AppError;
use campushub_core::types::FilterCriteria;
use campushub_service::ExploreView;

use super::App;
use super::course::CourseRow;
use super::note::NoteRow;
use crate::output::{self, OutputFormat};

/// Arguments for the explore command
#[derive(Debug, Args)]
pub struct ExploreArgs {
    /// Search text
    #[arg(default_value = "")]
    pub query: String,
    /// Branch to match for courses
    #[arg(short, long, default_value = "")]
    pub branch: String,
    /// Show every match instead of the teaser sections
    #[arg(long)]
    pub all: bool,
}

/// Execute the explore command
pub async fn execute(args: &ExploreArgs, app: &App) -> Result<(), AppError> {
    let mut view = ExploreView::open(app.documents()).await?;
    view.loaded().await?;
    view.set_criteria(
        FilterCriteria::all()
            .text(args.query.clone())
            .branch(args.branch.clone()),
    );

    let (courses, notes) = if args.all {
        (view.courses(), view.notes())
    } else {
        (view.course_preview(), view.note_preview())
    };
    view.dispose();

    let course_rows: Vec<CourseRow> = courses.iter().map(CourseRow::from).collect();
    let note_rows: Vec<NoteRow> = notes.iter().map(NoteRow::from).collect();
    match app.format {
        OutputFormat::Table => {
            println!("Courses");
            output::print_list(&course_rows, app.format);
            println!("Notes");
            output::print_list(&note_rows, app.format);
        }
        OutputFormat::Json => output::print_item(
            &serde_json::json!({ "courses": course_rows, "notes": note_rows }),
            app.format,
        ),
    }
    Ok(())
}
