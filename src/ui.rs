// UI layer: a numbered text menu driven through `dialoguer` prompts.
// Each handler gathers its answers, calls into `Session`, and reports the
// outcome through the same `Console`. Handlers are small and synchronous to
// keep the flow easy to follow.

use crate::catalog::{Book, BookPatch, NewBook, ReadingProgress};
use crate::session::Session;
use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, info};

/// How a reported line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Heading,
    Success,
    Warning,
}

/// Where the menu reads answers and writes reports. `Terminal` talks to the
/// keyboard and screen; tests substitute a scripted implementation.
pub trait Console {
    /// Ask for one line of free text. An empty answer is allowed.
    fn text(&mut self, prompt: &str) -> Result<String>;

    /// Report one line to the user.
    fn say(&mut self, tone: Tone, line: &str);

    /// Draw a read/total bar. Consoles without graphics skip it.
    fn progress_bar(&mut self, _progress: ReadingProgress) {}
}

/// Interactive console backed by `dialoguer::Input` and stdout.
#[derive(Default)]
pub struct Terminal;

impl Console for Terminal {
    fn text(&mut self, prompt: &str) -> Result<String> {
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer)
    }

    fn say(&mut self, tone: Tone, line: &str) {
        // Outcome messages are followed by a blank line before the menu.
        match tone {
            Tone::Plain => println!("{}", line),
            Tone::Heading => println!("\n{}", line.bold()),
            Tone::Success => println!("{}\n", line.green()),
            Tone::Warning => println!("{}\n", line.yellow()),
        }
    }

    fn progress_bar(&mut self, progress: ReadingProgress) {
        if progress.total == 0 {
            return;
        }
        // Hidden automatically when stdout is not a terminal.
        let bar = ProgressBar::with_draw_target(
            Some(progress.total as u64),
            ProgressDrawTarget::stdout(),
        );
        if let Ok(style) = ProgressStyle::with_template("[{bar:30}] {pos}/{len} read") {
            bar.set_style(style.progress_chars("#>-"));
        }
        bar.set_position(progress.read as u64);
        bar.abandon();
    }
}

/// Menu entries, numbered 1 to 7 on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    Remove,
    Find,
    Update,
    List,
    Progress,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 7] = [
        MenuChoice::Add,
        MenuChoice::Remove,
        MenuChoice::Find,
        MenuChoice::Update,
        MenuChoice::List,
        MenuChoice::Progress,
        MenuChoice::Exit,
    ];

    /// Parse the user's menu answer. Surrounding whitespace is ignored;
    /// anything other than `1`..`7` is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::Remove),
            "3" => Some(MenuChoice::Find),
            "4" => Some(MenuChoice::Update),
            "5" => Some(MenuChoice::List),
            "6" => Some(MenuChoice::Progress),
            "7" => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Add => "Add a new book",
            MenuChoice::Remove => "Remove a book",
            MenuChoice::Find => "Find a book",
            MenuChoice::Update => "Update book details",
            MenuChoice::List => "Show all books",
            MenuChoice::Progress => "Show reading progress",
            MenuChoice::Exit => "Exit",
        }
    }
}

/// Field offered by the search prompt. Recorded for diagnostics only:
/// `Catalog::find` matches both title and author whatever is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
    Unspecified,
}

impl SearchField {
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "1" => SearchField::Title,
            "2" => SearchField::Author,
            _ => SearchField::Unspecified,
        }
    }
}

/// A yes/no answer counts as yes only when it reads `yes` after trimming,
/// in any case. Everything else, including `y`, is no.
pub fn parse_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Main interactive menu. Runs until the user picks "Exit", which saves the
/// catalog one last time.
pub fn main_menu<C: Console>(session: &mut Session, console: &mut C) -> Result<()> {
    loop {
        print_menu(console);
        let answer = console.text("Enter your choice")?;
        let Some(choice) = MenuChoice::parse(&answer) else {
            info!("event=menu_invalid");
            console.say(Tone::Warning, "Invalid choice. Please try again.");
            continue;
        };
        debug!("event=menu_choice choice={:?}", choice);
        match choice {
            MenuChoice::Add => handle_add(session, console)?,
            MenuChoice::Remove => handle_remove(session, console)?,
            MenuChoice::Find => handle_find(session, console)?,
            MenuChoice::Update => handle_update(session, console)?,
            MenuChoice::List => show_all(session, console),
            MenuChoice::Progress => show_progress(session.progress(), console),
            MenuChoice::Exit => {
                session.save()?;
                info!("event=app_exit count={}", session.catalog().len());
                console.say(
                    Tone::Plain,
                    "Thank you for using Book Collection Manager. Goodbye!",
                );
                break;
            }
        }
    }
    Ok(())
}

fn print_menu<C: Console>(console: &mut C) {
    console.say(
        Tone::Heading,
        "\u{1F4DA} Welcome to Your Book Collection Manager! \u{1F4DA}",
    );
    for (i, choice) in MenuChoice::ALL.iter().enumerate() {
        console.say(Tone::Plain, &format!("{}. {}", i + 1, choice.label()));
    }
}

/// Collect the new book's fields and append it to the catalog.
fn handle_add<C: Console>(session: &mut Session, console: &mut C) -> Result<()> {
    let title = console.text("Enter the title of the book")?;
    let author = console.text("Enter the author of the book")?;
    let genre = console.text("Enter the genre of the book")?;
    let publication_year = console.text("Enter the publication year of the book")?;
    let read = parse_yes(&console.text("Have you read this book? (yes/no)")?);

    session.add(NewBook {
        title,
        author,
        genre,
        publication_year,
        read,
    })?;
    console.say(Tone::Success, "Book added successfully!");
    Ok(())
}

/// Ask for a title and remove the first book carrying it.
fn handle_remove<C: Console>(session: &mut Session, console: &mut C) -> Result<()> {
    let title = console.text("Enter the title of the book to remove")?;
    match session.remove(&title)? {
        Some(_) => console.say(Tone::Success, "Book removed successfully!"),
        None => console.say(Tone::Warning, "Book not found in the collection."),
    }
    Ok(())
}

/// Ask for a search field and term, then print every title or author match.
fn handle_find<C: Console>(session: &Session, console: &mut C) -> Result<()> {
    let field = SearchField::parse(
        &console.text("Search by:\n1. Title\n2. Author\nEnter your choice")?,
    );
    let query = console.text("Enter search term")?;
    debug!("event=search field={:?}", field);

    let found = session.find(&query);
    if found.is_empty() {
        console.say(Tone::Warning, "No matching books found.");
        return Ok(());
    }
    console.say(Tone::Plain, "Matching books:");
    for (i, book) in found.iter().enumerate() {
        console.say(Tone::Plain, &search_line(i + 1, book));
    }
    Ok(())
}

/// Look up a book by title and re-ask each field, showing the current value.
fn handle_update<C: Console>(session: &mut Session, console: &mut C) -> Result<()> {
    let title = console.text("Enter the title of the book you want to update")?;
    let Some(current) = session.catalog().get_by_title(&title).cloned() else {
        console.say(Tone::Warning, "Book not found in the collection.");
        return Ok(());
    };

    console.say(Tone::Plain, "Leave blank to keep existing values.");
    let new_title = console.text(&format!("Enter new title ({})", current.title))?;
    let author = console.text(&format!("Enter new author ({})", current.author))?;
    let genre = console.text(&format!("Enter new genre ({})", current.genre))?;
    let year = console.text(&format!(
        "Enter new publication year ({})",
        current.publication_year
    ))?;
    let read = parse_yes(&console.text("Have you read this book? (yes/no)")?);

    let patch = BookPatch::from_answers(new_title, author, genre, year, read);
    if session.update(&title, patch)? {
        console.say(Tone::Success, "Book updated successfully!");
    } else {
        console.say(Tone::Warning, "Book not found in the collection.");
    }
    Ok(())
}

fn show_all<C: Console>(session: &Session, console: &mut C) {
    let catalog = session.catalog();
    if catalog.is_empty() {
        console.say(Tone::Warning, "No books in the collection.");
        return;
    }
    console.say(Tone::Plain, "All books in the collection:");
    for (i, book) in catalog.list() {
        console.say(Tone::Plain, &list_line(i, book));
    }
    console.say(Tone::Plain, "");
}

fn show_progress<C: Console>(progress: ReadingProgress, console: &mut C) {
    console.say(
        Tone::Plain,
        &format!("Total books in the collection: {}", progress.total),
    );
    console.progress_bar(progress);
    console.say(Tone::Plain, &format!("Reading progress: {}", progress));
    console.say(Tone::Plain, "");
}

/// One row of "Show all books".
pub fn list_line(index: usize, book: &Book) -> String {
    format!(
        "{}. Title: {} by Author: {}, Genre: {} - Publication Year: {} - Status: {}",
        index,
        book.title,
        book.author,
        book.genre,
        book.publication_year,
        book.status_label()
    )
}

/// One row of search results.
pub fn search_line(index: usize, book: &Book) -> String {
    format!(
        "{}. Title: {}, Author: {}, Genre: {}, Publication Year: {}, Status: {}",
        index,
        book.title,
        book.author,
        book.genre,
        book.publication_year,
        book.status_label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choice_parses_numbers_and_trims() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Add));
        assert_eq!(MenuChoice::parse(" 7 \n"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("8"), None);
        assert_eq!(MenuChoice::parse("add"), None);
        assert_eq!(MenuChoice::parse(""), None);
    }

    #[test]
    fn menu_labels_follow_screen_order() {
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            assert_eq!(MenuChoice::parse(&(i + 1).to_string()), Some(*choice));
        }
    }

    #[test]
    fn only_full_yes_counts() {
        assert!(parse_yes("yes"));
        assert!(parse_yes("  YES "));
        assert!(!parse_yes("y"));
        assert!(!parse_yes("no"));
        assert!(!parse_yes(""));
    }

    #[test]
    fn search_field_falls_back_to_unspecified() {
        assert_eq!(SearchField::parse("1"), SearchField::Title);
        assert_eq!(SearchField::parse("2"), SearchField::Author);
        assert_eq!(SearchField::parse("3"), SearchField::Unspecified);
    }

    #[test]
    fn lines_show_status_labels() {
        let book = Book {
            title: "Dune".into(),
            author: "Herbert".into(),
            genre: "SciFi".into(),
            publication_year: "1965".into(),
            read: true,
        };
        assert_eq!(
            list_line(1, &book),
            "1. Title: Dune by Author: Herbert, Genre: SciFi - Publication Year: 1965 - Status: Read"
        );
        let unread = Book { read: false, ..book };
        assert_eq!(
            search_line(2, &unread),
            "2. Title: Dune, Author: Herbert, Genre: SciFi, Publication Year: 1965, Status: unread"
        );
    }
}
