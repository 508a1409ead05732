use clap::ValueEnum;
use serde::Serialize;
use studyaid::models::{Document, Flashcard, Subject, SubjectSummary};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Bundled output configuration passed to all print functions
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    /// The output format
    pub format: OutputFormat,
    /// When true, print minimal output (just IDs or counts)
    pub quiet: bool,
}

/// Prints any serializable value as pretty JSON
fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: could not format output: {}", e),
    }
}

/// Shortens a single-line preview of a longer text
fn preview(text: &str, max: usize) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() <= max && !text.contains('\n') {
        return line.to_string();
    }
    let cut: String = line.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}

/// Prints a list of subjects in the specified format
pub fn print_subjects(subjects: &[Subject], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if subjects.is_empty() {
                if !config.quiet {
                    println!("No subjects found.");
                }
                return;
            }
            if config.quiet {
                for subject in subjects {
                    println!("{}", subject.get_id());
                }
                return;
            }
            let max_id = subjects.iter().map(|s| s.get_id().len()).max().unwrap_or(2).max(2);
            println!("{:<width$}  NAME", "ID", width = max_id);
            for subject in subjects {
                println!("{:<width$}  {}", subject.get_id(), subject.get_name(), width = max_id);
            }
        }
        OutputFormat::Json => print_json(subjects),
    }
}

/// Prints a single subject in the specified format
pub fn print_subject(subject: &Subject, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", subject.get_id());
                return;
            }
            println!("ID:          {}", subject.get_id());
            println!("Name:        {}", subject.get_name());
            println!("Description: {}", subject.get_description());
        }
        OutputFormat::Json => print_json(subject),
    }
}

/// Prints subjects with their flashcard counts
pub fn print_summaries(summaries: &[SubjectSummary], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if summaries.is_empty() {
                if !config.quiet {
                    println!("No subjects found.");
                }
                return;
            }
            if config.quiet {
                for summary in summaries {
                    println!("{} {}", summary.get_subject().get_id(), summary.get_card_count());
                }
                return;
            }
            let max_id = summaries
                .iter()
                .map(|s| s.get_subject().get_id().len())
                .max()
                .unwrap_or(2)
                .max(2);
            println!("{:<width$}  {:>5}  NAME", "ID", "CARDS", width = max_id);
            for summary in summaries {
                let subject = summary.get_subject();
                println!(
                    "{:<width$}  {:>5}  {}",
                    subject.get_id(),
                    summary.get_card_count(),
                    subject.get_name(),
                    width = max_id,
                );
            }
        }
        OutputFormat::Json => print_json(summaries),
    }
}

/// Prints a list of flashcards in the specified format
pub fn print_flashcards(flashcards: &[Flashcard], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if flashcards.is_empty() {
                if !config.quiet {
                    println!("No flashcards found.");
                }
                return;
            }
            if config.quiet {
                for card in flashcards {
                    println!("{}", card.get_id());
                }
                return;
            }
            for card in flashcards {
                println!("[{}] Q: {}", card.get_id(), card.get_question());
                println!("{:width$}  A: {}", "", card.get_answer(), width = card.get_id().len() + 1);
            }
        }
        OutputFormat::Json => print_json(flashcards),
    }
}

/// Prints a single flashcard in the specified format
pub fn print_flashcard(card: &Flashcard, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", card.get_id());
                return;
            }
            println!("ID:       {}", card.get_id());
            println!("Question: {}", card.get_question());
            println!("Answer:   {}", card.get_answer());
            if let Some(document_id) = card.get_document_id() {
                println!("Document: {}", document_id);
            }
        }
        OutputFormat::Json => print_json(card),
    }
}

fn document_status(document: &Document) -> &'static str {
    if document.is_deleted() {
        "deleted"
    } else if document.is_processed() {
        "processed"
    } else {
        "new"
    }
}

/// Prints a list of documents in the specified format
pub fn print_documents(documents: &[Document], config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if documents.is_empty() {
                if !config.quiet {
                    println!("No documents found.");
                }
                return;
            }
            if config.quiet {
                for document in documents {
                    println!("{}", document.get_id());
                }
                return;
            }
            println!("{:<32}  {:<7}  {:<9}  {:<16}  FILE", "ID", "SUBJECT", "STATUS", "UPLOADED");
            for document in documents {
                println!(
                    "{:<32}  {:<7}  {:<9}  {:<16}  {}",
                    document.get_id(),
                    document.get_subject_id(),
                    document_status(document),
                    document.get_uploaded_at().format("%Y-%m-%d %H:%M"),
                    preview(&document.get_original_filename(), 40),
                );
            }
        }
        OutputFormat::Json => print_json(documents),
    }
}

/// Prints a single document in the specified format
pub fn print_document(document: &Document, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if config.quiet {
                println!("{}", document.get_id());
                return;
            }
            println!("ID:       {}", document.get_id());
            println!("File:     {}", document.get_original_filename());
            println!("Subject:  {}", document.get_subject_id());
            println!("Uploaded: {}", document.get_uploaded_at().format("%Y-%m-%d %H:%M:%S"));
            println!("Status:   {}", document_status(document));
        }
        OutputFormat::Json => print_json(document),
    }
}

/// Prints a success message in the specified format
pub fn print_success(message: &str, config: &OutputConfig) {
    match config.format {
        OutputFormat::Human => {
            if !config.quiet {
                println!("{}", message);
            }
        }
        OutputFormat::Json => {
            print_json(&serde_json::json!({"status": "ok", "message": message}));
        }
    }
}
