//! The interactive main menu and the per-entity submenus.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use rusqlite::Connection;
use storefront_core::{
    Address, Cart, CartItem, Category, Customer, Order, Product, Return, Review, Sku,
};
use storefront_db::{AppConfig, QuerySource};
use storefront_sqlite::{CustomerManager, EntityManager, Store, run_init, run_seed};

use crate::forms::Form;
use crate::prompt::Prompt;

const RESET: &str = "\x1b[0m";
pub const CYAN: &str = "\x1b[36m";
pub const GREEN: &str = "\x1b[32m";
const MAGENTA: &str = "\x1b[35m";
pub const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";

/// Wraps text in ANSI colors when enabled.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn paint(&self, color: &str, text: impl Display) -> String {
        if self.enabled {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

pub struct Console<'a, R, W> {
    prompt: Prompt<R, W>,
    conn: &'a Connection,
    queries: &'a QuerySource,
    config: &'a AppConfig,
    palette: Palette,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(
        prompt: Prompt<R, W>,
        conn: &'a Connection,
        queries: &'a QuerySource,
        config: &'a AppConfig,
    ) -> Self {
        Self {
            prompt,
            conn,
            queries,
            config,
            palette: Palette::new(config.color),
        }
    }

    /// Runs the main menu until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        match self.main_menu() {
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(()),
            other => other,
        }
    }

    fn main_menu(&mut self) -> io::Result<()> {
        loop {
            let heading = self.palette.paint(MAGENTA, "=== MAIN MENU ===");
            let out = self.prompt.out();
            writeln!(out)?;
            writeln!(out, "{heading}")?;
            writeln!(out, "[1] {}", Customer::TITLE)?;
            writeln!(out, "[2] {}", Category::TITLE)?;
            writeln!(out, "[3] {}", Product::TITLE)?;
            writeln!(out, "[4] {}", Sku::TITLE)?;
            writeln!(out, "[5] {}", Cart::TITLE)?;
            writeln!(out, "[6] {}", CartItem::TITLE)?;
            writeln!(out, "[7] {}", Review::TITLE)?;
            writeln!(out, "[8] {}", Address::TITLE)?;
            writeln!(out, "[9] {}", Order::TITLE)?;
            writeln!(out, "[10] {}", Return::TITLE)?;
            writeln!(out, "[I] Re-run {}", self.config.init_script)?;
            writeln!(out, "[D] Insert sample data ({})", self.config.seed_script)?;
            writeln!(out, "[Q] Quit")?;

            let choice = self.prompt.line("Choose an option: ")?.to_lowercase();
            match choice.as_str() {
                "1" => self.entity_menu::<Customer>()?,
                "2" => self.entity_menu::<Category>()?,
                "3" => self.entity_menu::<Product>()?,
                "4" => self.entity_menu::<Sku>()?,
                "5" => self.entity_menu::<Cart>()?,
                "6" => self.entity_menu::<CartItem>()?,
                "7" => self.entity_menu::<Review>()?,
                "8" => self.entity_menu::<Address>()?,
                "9" => self.entity_menu::<Order>()?,
                "10" => self.entity_menu::<Return>()?,
                "i" => {
                    let result = run_init(self.conn, self.queries, &self.config.init_script);
                    self.report(result, "Schema reinitialized.")?;
                }
                "d" => {
                    let result = run_seed(self.conn, self.queries, &self.config.seed_script);
                    self.report(result, "Sample data inserted.")?;
                }
                "q" => return Ok(()),
                _ => self.invalid()?,
            }
        }
    }

    fn entity_menu<E: Form>(&mut self) -> io::Result<()> {
        let store = Store::new(self.conn, self.queries);
        let manager = EntityManager::<E>::new(store);
        let delete_key = if E::HAS_PASSWORD { "6" } else { "5" };

        loop {
            let heading = self.palette.paint(CYAN, format!("\n-- {} --", E::TITLE));
            let out = self.prompt.out();
            writeln!(out, "{heading}")?;
            writeln!(out, "[1] List")?;
            writeln!(out, "[2] Get by ID")?;
            writeln!(out, "[3] Create")?;
            writeln!(out, "[4] Update")?;
            if E::HAS_PASSWORD {
                writeln!(out, "[5] Change password")?;
            }
            writeln!(out, "[{delete_key}] Delete")?;
            writeln!(out, "[B] Back")?;

            let choice = self.prompt.line("Option: ")?.to_lowercase();
            match choice.as_str() {
                "1" => match manager.list() {
                    Ok(items) => {
                        self.ok()?;
                        for (i, item) in items.iter().enumerate() {
                            writeln!(self.prompt.out(), "#{}: {item}", i + 1)?;
                        }
                    }
                    Err(e) => self.error(e)?,
                },
                "2" => {
                    let id = self.prompt.int("ID: ")?;
                    match manager.get(id) {
                        Ok(item) => {
                            self.ok()?;
                            writeln!(self.prompt.out(), "{item}")?;
                        }
                        Err(e) => self.error(e)?,
                    }
                }
                "3" => {
                    let draft = E::read_create(&mut self.prompt)?;
                    match manager.create(&draft).and_then(|id| manager.get(id)) {
                        Ok(item) => {
                            self.ok()?;
                            writeln!(self.prompt.out(), "Created {item}")?;
                        }
                        Err(e) => self.error(e)?,
                    }
                }
                "4" => {
                    let id = self.prompt.int("ID: ")?;
                    let draft = E::read_update(&mut self.prompt)?;
                    self.report(manager.update(id, &draft), "OK")?;
                }
                "5" if E::HAS_PASSWORD => {
                    let id = self.prompt.int("ID: ")?;
                    let password = self.prompt.line("New password: ")?;
                    let result = CustomerManager::new(store).update_password(id, &password);
                    self.report(result, "OK")?;
                }
                "b" => return Ok(()),
                key if key == delete_key => {
                    let id = self.prompt.int("ID: ")?;
                    if self.prompt.confirm("Are you sure? (y/N): ")? {
                        self.report(manager.delete(id), "OK")?;
                    }
                }
                _ => self.invalid()?,
            }
        }
    }

    fn report<T, E: Display>(&mut self, result: Result<T, E>, success: &str) -> io::Result<()> {
        match result {
            Ok(_) => {
                let line = self.palette.paint(GREEN, success);
                writeln!(self.prompt.out(), "{line}")
            }
            Err(e) => self.error(e),
        }
    }

    fn ok(&mut self) -> io::Result<()> {
        self.report(Ok::<(), String>(()), "OK")
    }

    fn error(&mut self, err: impl Display) -> io::Result<()> {
        let line = self.palette.paint(RED, format!("Error: {err}"));
        writeln!(self.prompt.out(), "{line}")
    }

    fn invalid(&mut self) -> io::Result<()> {
        let line = self.palette.paint(RED, "Invalid option");
        writeln!(self.prompt.out(), "{line}")
    }
}
