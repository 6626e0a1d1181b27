// Entrypoint for the book catalog.
// - Keeps `main` small: start logging, load the catalog and hand it to the
//   UI loop.
// - Returns `anyhow::Result` so a failed save ends the process with an error.

use book_catalog::logging::{init_logging, LogConfig};
use book_catalog::session::Session;
use book_catalog::store::CatalogStore;
use book_catalog::ui::{main_menu, Terminal};

fn main() -> anyhow::Result<()> {
    // Logging is best effort; the catalog works without it.
    if let Err(err) = init_logging(&LogConfig::from_env()) {
        eprintln!("Logging disabled: {err}");
    }

    // Load `book_collection.json` from the working directory, or start empty.
    let mut session = Session::open(CatalogStore::default_location())?;

    // Start the interactive menu. This call blocks until the user exits.
    main_menu(&mut session, &mut Terminal)?;
    Ok(())
}
