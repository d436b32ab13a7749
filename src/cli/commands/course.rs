use std::path::PathBuf;

use clap::Subcommand;
use serde_json::json;

use crate::api::{CourseDraft, CourseKey, Platform};
use crate::cli::input::{load_bytes, load_draft};
use crate::cli::utils::{
    output_collection, output_empty_collection, output_record, output_success, report,
    weights_line,
};
use crate::cli::OutputFormat;
use crate::validation::NO_COURSES_ERROR;

#[derive(Subcommand)]
pub enum CourseCommands {
    #[command(about = "List courses visible to the current user type")]
    List,

    #[command(about = "Show one course")]
    Show {
        #[arg(help = "Course code, e.g. COMP1511")]
        code: String,
        #[arg(long, requires = "term", help = "Offering year")]
        year: Option<i64>,
        #[arg(long, requires = "year", help = "Offering term, e.g. T2")]
        term: Option<String>,
        #[arg(long, help = "Course version")]
        version: Option<String>,
    },

    #[command(about = "Add a course from a JSON or YAML draft")]
    Add {
        #[arg(help = "Draft file")]
        file: PathBuf,
    },

    #[command(about = "Replace an existing offering with a JSON or YAML draft")]
    Update {
        #[arg(help = "Code of the offering being edited")]
        code: String,
        #[arg(help = "Year of the offering being edited")]
        year: i64,
        #[arg(help = "Term of the offering being edited")]
        term: String,
        #[arg(long, help = "Draft file")]
        file: PathBuf,
    },

    #[command(about = "Import a course from a handbook URL")]
    ImportUrl {
        #[arg(help = "Handbook page URL")]
        url: String,
    },

    #[command(about = "Import a course from a course outline PDF")]
    ImportPdf {
        #[arg(help = "PDF file")]
        file: PathBuf,
    },
}

pub async fn handle(
    cmd: CourseCommands,
    platform: &Platform,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        CourseCommands::List => {
            let courses = platform
                .list_courses()
                .await
                .map_err(|e| report(&output_format, e))?;
            if courses.is_empty() {
                return output_empty_collection(&output_format, "courses", NO_COURSES_ERROR);
            }
            output_collection(&output_format, "courses", &courses, |c| {
                format!("{:<10} {}", c.code, c.name)
            })
        }
        CourseCommands::Show {
            code,
            year,
            term,
            version,
        } => {
            let year_term = year.zip(term.as_deref());
            let course = platform
                .course(&code, year_term, version.as_deref())
                .await
                .map_err(|e| report(&output_format, e))?;
            if let OutputFormat::Text = output_format {
                println!("{} {}", course.code, course.name);
                println!("Skills: {}", weights_line(&course.skills));
                println!("Knowledge: {}", weights_line(&course.knowledge));
                return Ok(());
            }
            output_record(&output_format, &course.code, &course)
        }
        CourseCommands::Add { file } => {
            let draft: CourseDraft = load_draft(&file)?;
            platform
                .save_course(&draft)
                .await
                .map_err(|e| report(&output_format, e))?;
            output_success(
                &output_format,
                &format!("Course {} saved", draft.code),
                Some(json!({ "code": draft.code })),
            )
        }
        CourseCommands::Update {
            code,
            year,
            term,
            file,
        } => {
            let draft: CourseDraft = load_draft(&file)?;
            let original = CourseKey::new(code, year, term);
            platform
                .update_course(&original, &draft)
                .await
                .map_err(|e| report(&output_format, e))?;
            output_success(
                &output_format,
                &format!("Course {} {} {} updated", original.code, original.year, original.term),
                None,
            )
        }
        CourseCommands::ImportUrl { url } => {
            let response = platform
                .import_course_url(&url)
                .await
                .map_err(|e| report(&output_format, e))?;
            output_success(&output_format, "Course imported", Some(response))
        }
        CourseCommands::ImportPdf { file } => {
            let pdf = load_bytes(&file)?;
            let response = platform
                .import_course_pdf(&pdf)
                .await
                .map_err(|e| report(&output_format, e))?;
            output_success(&output_format, "Course imported", Some(response))
        }
    }
}
