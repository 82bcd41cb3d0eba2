//! Interactive session event loop
//!
//! Every source of change (stdin lines, debounce timer firings) is funneled
//! through one mpsc channel and handled by this controller in arrival order.
//! That single serialized queue is the whole concurrency story: slot state
//! is only ever touched from here, so an accept decision and its slot update
//! can never interleave with another scan.

use colored::Colorize;
use prettytable::{row, Table};

use crate::inventory::slot::SENTINEL_GAMEPACK;
use crate::inventory::{next_slot, slot::gamepack_of, InventoryStore, SlotId};
use crate::scan::{analyze, ScanBuffer, TokioFlushScheduler};
use crate::validate::{validate, ScanDecision};
use tokio::sync::mpsc::UnboundedReceiver;

/// Events serialized onto the controller's queue
#[derive(Debug)]
pub enum AppEvent {
    /// One line of raw input from the wedge scanner / operator
    Line(String),
    /// A scheduled flush came due; payload is the scheduler generation
    FlushDue(u64),
    /// Input source closed; end the session
    Shutdown,
}

/// A scan waiting on the operator's sold-out confirmation
struct PendingScan {
    identifier: String,
    previous_gamepack: String,
}

pub struct EventController {
    store: InventoryStore,
    buffer: ScanBuffer<TokioFlushScheduler>,
    target: SlotId,
    awaiting: Option<PendingScan>,
    events: UnboundedReceiver<AppEvent>,
}

impl EventController {
    pub fn new(
        store: InventoryStore,
        buffer: ScanBuffer<TokioFlushScheduler>,
        events: UnboundedReceiver<AppEvent>,
    ) -> Self {
        Self {
            store,
            buffer,
            target: SlotId::FIRST,
            awaiting: None,
            events,
        }
    }

    /// Run until stdin closes or the operator quits.
    pub async fn run(&mut self) {
        println!("Scan a pack, or type /help for commands.");
        self.announce_target();

        while let Some(event) = self.events.recv().await {
            match event {
                AppEvent::FlushDue(generation) => {
                    // A superseded or cancelled timer may still have sent
                    // its signal before the abort landed; drop it
                    if self.buffer.scheduler().is_current(generation) {
                        let identifier = self.buffer.flush();
                        self.submit(identifier);
                    } else {
                        log::trace!("discarding stale flush generation {}", generation);
                    }
                }
                AppEvent::Line(line) => {
                    if !self.handle_line(&line) {
                        break;
                    }
                }
                AppEvent::Shutdown => break,
            }
        }
        log::info!("session ended");
    }

    /// Handle one input line. Returns false to end the session.
    pub fn handle_line(&mut self, line: &str) -> bool {
        if self.awaiting.is_some() {
            self.resolve_confirmation(line);
            return true;
        }

        let trimmed = line.trim();
        if let Some(command) = trimmed.strip_prefix('/') {
            return self.handle_command(command);
        }

        // The line reader stripped the Enter keystroke; restore it, since it
        // is the scanner's terminator and drives the completion predicate
        self.buffer.on_fragment(line);
        self.buffer.on_fragment("\n");
        true
    }

    fn handle_command(&mut self, command: &str) -> bool {
        let mut parts = command.split_whitespace();
        match parts.next() {
            Some("status") => self.print_status(),
            Some("sold") => self.print_sold_out_today(),
            Some("slot") => match parts.next().and_then(|s| s.parse::<u64>().ok()) {
                Some(n) => match SlotId::new(n) {
                    Ok(id) => {
                        self.target = id;
                        self.announce_target();
                    }
                    Err(e) => println!("{}", e.to_string().red()),
                },
                None => println!("usage: /slot <1-20>"),
            },
            Some("empty") => {
                self.store.mark_as_empty(self.target);
                println!("Slot {} confirmed empty", self.target);
                self.advance();
            }
            Some("soldout") => match self.store.mark_as_sold_out(self.target) {
                Some(record) => {
                    println!(
                        "Slot {}: {} ({}) marked sold out",
                        self.target, record.game_name, record.gamepack_number
                    );
                }
                None => println!("Slot {} has no pack to mark sold out", self.target),
            },
            Some("clear") => {
                self.store.clear_slot(self.target);
                println!("Slot {} cleared", self.target);
            }
            Some("submit") => {
                let identifier = self.buffer.flush();
                self.submit(identifier);
            }
            Some("delay") => match parts.next() {
                Some(value) => match super::cli::args::parse_scanner_delay(value) {
                    Ok(ms) => {
                        self.buffer.set_delay(std::time::Duration::from_millis(ms));
                        println!("Scanner delay set to {}ms", ms);
                    }
                    Err(message) => println!("{}", message.red()),
                },
                None => println!("Scanner delay is {}ms", self.buffer.delay().as_millis()),
            },
            Some("analyze") => {
                let raw = command.strip_prefix("analyze").unwrap_or("").trim_start();
                self.print_analysis(raw);
            }
            Some("help") => self.print_help(),
            Some("quit") | Some("exit") => return false,
            _ => println!("Unknown command; type /help"),
        }
        true
    }

    /// Validate an extracted identifier against the target slot and apply
    /// the decision.
    fn submit(&mut self, identifier: String) {
        match validate(&identifier, self.target, &self.store) {
            ScanDecision::Accept => self.apply(&identifier),
            ScanDecision::Reject { reason } => {
                log::warn!("scan rejected for slot {}: {}", self.target, reason);
                println!("{} {}", "✗".red(), reason);
            }
            ScanDecision::RequiresConfirmation {
                previous_gamepack,
                message,
            } => {
                println!("{} [y/n]", message.yellow());
                self.awaiting = Some(PendingScan {
                    identifier,
                    previous_gamepack,
                });
            }
        }
    }

    /// Operator answered the sold-out prompt.
    fn resolve_confirmation(&mut self, line: &str) {
        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => {
                if let Some(pending) = self.awaiting.take() {
                    log::info!(
                        "operator confirmed pack {} sold out",
                        pending.previous_gamepack
                    );
                    self.store.mark_as_sold_out(self.target);
                    self.apply(&pending.identifier);
                }
            }
            "n" | "no" => {
                self.awaiting = None;
                self.buffer.reset();
                println!("Scan discarded; slot {} unchanged", self.target);
            }
            _ => println!("Please answer y or n"),
        }
    }

    /// Apply an accepted identifier to the target slot and move on.
    fn apply(&mut self, identifier: &str) {
        if gamepack_of(identifier) == SENTINEL_GAMEPACK {
            self.store.mark_as_empty(self.target);
            println!("{} Slot {} confirmed empty", "✓".green(), self.target);
        } else {
            self.store.update_slot(self.target, identifier);
            let game = self
                .store
                .catalog()
                .for_gamepack(gamepack_of(identifier))
                .name
                .clone();
            println!("{} Slot {}: {}", "✓".green(), self.target, game);
        }
        self.advance();
    }

    fn advance(&mut self) {
        self.target = next_slot(self.store.slots());
        self.announce_target();
    }

    fn announce_target(&self) {
        println!("→ Slot {}", self.target);
    }

    fn print_status(&self) {
        let mut table = Table::new();
        table.add_row(row!["Slot", "Status", "Gamepack", "Game", "Sold out", "Updated"]);
        for slot in self.store.slots() {
            let (gamepack, game) = match slot.gamepack() {
                Some(gp) => (gp.to_string(), self.store.catalog().for_gamepack(gp).name.clone()),
                None => (String::new(), String::new()),
            };
            table.add_row(row![
                slot.id,
                slot.status,
                gamepack,
                game,
                if slot.sold_out { "yes" } else { "" },
                slot.updated_at
                    .map(|t| t.format("%H:%M:%S").to_string())
                    .unwrap_or_default(),
            ]);
        }
        table.printstd();
    }

    fn print_sold_out_today(&self) {
        let packs = self.store.sold_out_packs_today();
        if packs.is_empty() {
            println!("No packs sold out today");
            return;
        }
        let mut table = Table::new();
        table.add_row(row!["Time", "Slot", "Gamepack", "Game", "Price", "Type"]);
        for pack in packs {
            table.add_row(row![
                pack.sold_out_date.format("%H:%M:%S"),
                pack.slot_id,
                pack.gamepack_number,
                pack.game_name,
                pack.price,
                pack.kind,
            ]);
        }
        table.printstd();
    }

    fn print_analysis(&self, raw: &str) {
        let report = analyze(raw);
        println!("raw length:     {}", report.raw_len);
        println!("cleaned digits: {:?} ({})", report.cleaned, report.cleaned_len);
        println!("char codes:     {:?}", report.char_codes);
        if report.control_chars.is_empty() {
            println!("control chars:  none");
        } else {
            println!("control chars:  {:?}", report.control_chars);
        }
    }

    fn print_help(&self) {
        println!("/status        show all slots");
        println!("/slot <n>      target slot n");
        println!("/empty         mark target slot confirmed empty");
        println!("/soldout       mark target slot's pack sold out");
        println!("/clear         reset target slot");
        println!("/sold          today's sold-out packs");
        println!("/submit        submit the pending scan now");
        println!("/delay [ms]    show or set the scanner delay (100-1000)");
        println!("/analyze <raw> diagnose a raw capture");
        println!("/quit          end the session");
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &InventoryStore {
        &self.store
    }

    #[cfg(test)]
    pub(crate) fn target(&self) -> SlotId {
        self.target
    }

    #[cfg(test)]
    pub(crate) fn buffer(&self) -> &ScanBuffer<TokioFlushScheduler> {
        &self.buffer
    }
}
