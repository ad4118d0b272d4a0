use anyhow::Result;
use readme_wizard::config::Config;
use readme_wizard::session::Session;
use readme_wizard::terminal::Terminal;

/// Run the wizard on the real terminal until the user exits.
pub fn execute(config: &Config) -> Result<()> {
    let workbook = super::open_workbook(config)?;
    let terminal = Terminal::stdio(config.terminal.clear_screen);
    let mut session = Session::new(terminal, Box::new(workbook), config.output.clone());
    session.start()
}
