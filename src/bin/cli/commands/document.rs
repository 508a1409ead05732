use clap::Subcommand;
use std::path::PathBuf;

use crate::client::StudyaidClient;
use crate::output::{self, OutputConfig};

/// Document commands
#[derive(Subcommand, Debug)]
pub enum DocumentCommands {
    /// List documents, soft-deleted ones included
    List {
        /// Only list the documents of this subject
        #[clap(long)]
        subject: Option<String>,
    },
    /// Upload a markdown file to a subject
    Upload {
        /// The subject ID
        subject_id: String,
        /// Path of the `.md` or `.markdown` file
        file: PathBuf,
    },
    /// Soft-delete a document; its flashcards are kept
    Delete {
        /// The document ID
        id: String,
    },
    /// Generate flashcards from a document
    Process {
        /// The document ID
        id: String,
    },
    /// Download a document
    Download {
        /// The document ID
        id: String,
        /// Where to write the file; defaults to its original name
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
}

/// Executes a document command
pub async fn execute(
    client: &StudyaidClient,
    cmd: DocumentCommands,
    config: &OutputConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        DocumentCommands::List { subject } => {
            let documents = match subject {
                Some(subject_id) => client.list_subject_documents(&subject_id).await?,
                None => client.list_documents().await?,
            };
            output::print_documents(&documents, config);
        }
        DocumentCommands::Upload { subject_id, file } => {
            let document = client.upload_document(&subject_id, &file).await?;
            output::print_document(&document, config);
        }
        DocumentCommands::Delete { id } => {
            let response = client.delete_document(&id).await?;
            output::print_success(&response.message, config);
        }
        DocumentCommands::Process { id } => {
            let response = client.process_document(&id).await?;
            output::print_success(&response.message, config);
        }
        DocumentCommands::Download { id, output: path } => {
            let (filename, bytes) = client.download_document(&id).await?;
            let path = path
                .or_else(|| filename.map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(format!("{}.md", id)));
            tokio::fs::write(&path, &bytes).await?;
            output::print_success(
                &format!("Saved {} bytes to {}", bytes.len(), path.display()),
                config,
            );
        }
    }
    Ok(())
}
