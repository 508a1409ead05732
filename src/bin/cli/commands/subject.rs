use clap::Subcommand;

use crate::client::StudyaidClient;
use crate::output::{self, OutputConfig};

/// Subject management commands
#[derive(Subcommand, Debug)]
pub enum SubjectCommands {
    /// List all subjects
    List,
    /// List subjects with their flashcard counts
    Summary,
    /// Create a new subject
    Create {
        /// Name of the subject
        #[clap(long)]
        name: String,
        /// Optional description
        #[clap(long)]
        description: Option<String>,
    },
}

/// Executes a subject command
pub async fn execute(
    client: &StudyaidClient,
    cmd: SubjectCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        SubjectCommands::List => {
            let subjects = client.list_subjects().await?;
            output::print_subjects(&subjects, config);
        }
        SubjectCommands::Summary => {
            let summaries = client.list_subject_summaries().await?;
            output::print_summaries(&summaries, config);
        }
        SubjectCommands::Create { name, description } => {
            let subject = client.create_subject(name, description).await?;
            output::print_subject(&subject, config);
        }
    }
    Ok(())
}
