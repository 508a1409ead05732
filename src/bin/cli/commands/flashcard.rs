use clap::Subcommand;

use crate::client::StudyaidClient;
use crate::output::{self, OutputConfig};

/// Flashcard commands
#[derive(Subcommand, Debug)]
pub enum FlashcardCommands {
    /// List a subject's flashcards in random order
    List {
        /// The subject ID
        subject_id: String,
        /// Only show cards generated from this document
        #[clap(long)]
        document: Option<String>,
    },
    /// Add a flashcard by hand
    Add {
        /// The subject ID
        subject_id: String,
        /// The question side
        #[clap(long)]
        question: String,
        /// The answer side
        #[clap(long)]
        answer: String,
        /// The document the card belongs to
        #[clap(long)]
        document: Option<String>,
    },
}

/// Executes a flashcard command
pub async fn execute(
    client: &StudyaidClient,
    cmd: FlashcardCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        FlashcardCommands::List { subject_id, document } => {
            let flashcards = client.list_flashcards(&subject_id, document.as_deref()).await?;
            output::print_flashcards(&flashcards, config);
        }
        FlashcardCommands::Add { subject_id, question, answer, document } => {
            let flashcard = client.create_flashcard(&subject_id, question, answer, document).await?;
            output::print_flashcard(&flashcard, config);
        }
    }
    Ok(())
}
