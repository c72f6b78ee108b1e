//! # Shopping Session
//!
//! Drives the shopping state machine over a console.
//!
//! ## Event Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────────────┐   event    ┌──────────────────┐   effects            │
//! │   │  observe()   │──────────► │  transition()    │──────────┐           │
//! │   │ prompt/read  │            │  (grocer-core)   │          │           │
//! │   └──────▲───────┘            └────────┬─────────┘          ▼           │
//! │          │                             │ next state  ┌──────────────┐   │
//! │          └─────────────────────────────┴─────────────│   apply()    │   │
//! │                                                      │ cache, cart, │   │
//! │                                                      │ stock, receipt│  │
//! │                                                      └──────────────┘   │
//! │   ... until Leave                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session owns the cart and the shelf cache. It borrows the inventory;
//! closing the inventory is up to whoever opened it.

use chrono::Local;
use std::collections::HashMap;
use std::io::Write;
use tokio::io::AsyncBufRead;
use tracing::{debug, info};

use crate::config::ShopConfig;
use crate::console::{self, Console};
use crate::error::ShopResult;
use crate::receipt::{self, Receipt};
use grocer_core::session::parse_shelf_command;
use grocer_core::{
    admit, transition, Admission, AisleLayout, AisleNumber, Cart, CartLine, Effect, ShelfListing,
    ShopEvent, ShopState,
};
use grocer_db::Inventory;

const AISLE_PROMPT: &str = "Which aisle would you like to visit? >> ";
const SHELF_PROMPT: &str = "Choose a number to add item to cart or enter \"back\" >> ";

/// One shopper's visit to the store.
pub struct Session<'a, R, W> {
    inventory: &'a mut Inventory,
    config: &'a ShopConfig,
    console: Console<R, W>,
    aisles: AisleLayout,
    shelves: HashMap<AisleNumber, Vec<ShelfListing>>,
    cart: Cart,
    state: ShopState,
    receipt: Option<Receipt>,
}

impl<'a, R: AsyncBufRead + Unpin, W: Write> Session<'a, R, W> {
    /// Starts a session at the aisle directory with an empty cart.
    pub fn new(inventory: &'a mut Inventory, config: &'a ShopConfig, input: R, output: W) -> Self {
        let aisles = inventory.get_aisles();

        Session {
            inventory,
            config,
            console: Console::new(input, output),
            aisles,
            shelves: HashMap::new(),
            cart: Cart::new(),
            state: ShopState::Aisles,
            receipt: None,
        }
    }

    /// Runs until the shopper leaves.
    ///
    /// Returns the receipt if anything was bought.
    ///
    /// ## Errors
    /// Catalog and console failures end the session. Bad input never does.
    pub async fn run(&mut self) -> ShopResult<Option<Receipt>> {
        self.console.blank()?;
        self.console.say(console::welcome(&self.config.store_name))?;

        while !self.state.is_terminal() {
            let event = self.observe().await?;
            let (next, effects) = transition(self.state, event);

            if next != self.state {
                debug!(from = ?self.state, to = ?next, "State change");
            }
            self.state = next;

            for effect in effects {
                self.apply(effect).await?;
            }
        }

        self.console.say("Goodbye!")?;
        Ok(self.receipt.take())
    }

    /// Current state.
    pub fn state(&self) -> ShopState {
        self.state
    }

    /// The cart as it stands.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Everything written to the console so far.
    pub fn output(&self) -> &W {
        self.console.output()
    }

    // =========================================================================
    // Observing
    // =========================================================================

    /// Prompts as the current state requires and turns the answer into an
    /// event.
    async fn observe(&mut self) -> ShopResult<ShopEvent> {
        match self.state {
            ShopState::Aisles => self.choose_aisle().await,
            ShopState::Shelf { .. } => Ok(ShopEvent::ShelfStocked),
            ShopState::AddItem { aisle } => self.choose_item(aisle).await,
            ShopState::Checkout | ShopState::Leave => Ok(ShopEvent::CheckoutRequested {
                cart_empty: self.cart.is_empty(),
            }),
        }
    }

    async fn choose_aisle(&mut self) -> ShopResult<ShopEvent> {
        let (Some(&min), Some(&max)) = (self.aisles.keys().next(), self.aisles.keys().next_back())
        else {
            info!("Store has no aisles");
            return Ok(ShopEvent::NoAisles);
        };

        loop {
            self.console.blank()?;
            self.console.say(console::aisle_directory(&self.aisles))?;
            self.console.blank()?;

            let Some(choice) = self.console.prompt_int(AISLE_PROMPT, min, max).await? else {
                return Ok(ShopEvent::InputClosed);
            };

            match self.aisles.get(&choice) {
                Some(description) => {
                    self.console.say(format!("To the {} aisle!", description))?;
                    self.console.blank()?;
                    return Ok(ShopEvent::AisleChosen(choice));
                }
                None => self.console.say("Let us visit an aisle listed above!")?,
            }
        }
    }

    async fn choose_item(&mut self, aisle: AisleNumber) -> ShopResult<ShopEvent> {
        let shelf = self.shelves.get(&aisle).map(Vec::as_slice).unwrap_or_default();
        let listing = console::shelf_listing(shelf);
        let shelf_len = shelf.len();

        self.console.blank()?;
        if !listing.is_empty() {
            self.console.say(listing)?;
        }

        Ok(match self.console.ask(SHELF_PROMPT).await? {
            Some(answer) => ShopEvent::ShelfInput {
                command: parse_shelf_command(&answer),
                shelf_len,
            },
            None => ShopEvent::InputClosed,
        })
    }

    // =========================================================================
    // Effects
    // =========================================================================

    async fn apply(&mut self, effect: Effect) -> ShopResult<()> {
        match effect {
            Effect::LoadShelf { aisle } => self.load_shelf(aisle).await,
            Effect::TryAdd { aisle, index } => self.try_add(aisle, index),
            Effect::SelectionOutOfRange { min, max } => {
                self.console.say(format!(
                    ">>\tChoose an integer between {} and {} inclusive.",
                    min, max
                ))?;
                Ok(())
            }
            Effect::Farewell => {
                self.console.say("Your cart is empty. Come back soon!")?;
                Ok(())
            }
            Effect::Finalize => self.finalize(),
        }
    }

    /// Fills the shelf cache for `aisle` on its first visit.
    async fn load_shelf(&mut self, aisle: AisleNumber) -> ShopResult<()> {
        if self.shelves.contains_key(&aisle) {
            return Ok(());
        }

        let shelf = self.inventory.get_aisle_inventory(aisle).await?;
        debug!(aisle = aisle, listings = shelf.len(), "Shelf cached");
        self.shelves.insert(aisle, shelf);
        Ok(())
    }

    /// Puts one unit in the cart if stock allows.
    fn try_add(&mut self, aisle: AisleNumber, index: usize) -> ShopResult<()> {
        let Some(listing) = self.shelves.get(&aisle).and_then(|shelf| shelf.get(index)) else {
            return Ok(());
        };

        let in_cart = self.cart.count_for(listing.id());
        let on_hand = self.inventory.product_quantity_for(listing.id());

        self.console.blank()?;
        match admit(in_cart, on_hand) {
            Admission::Admit => {
                self.console.say(format!("\tAdding {} to cart!", listing))?;
                self.cart.add(CartLine::from_listing(listing));
                debug!(product_id = listing.id(), in_cart = in_cart + 1, "Added to cart");
            }
            Admission::MaxReached => {
                self.console.say(format!(
                    ">>\tYou've already reached the max amount of {} in your cart.",
                    listing.name()
                ))?;
            }
            Admission::Unavailable => {
                self.console
                    .say(format!(">>\tSorry, {} is not in stock.", listing.name()))?;
            }
        }
        self.console.blank()?;
        Ok(())
    }

    /// Saves the receipt, reserves stock for every line, prints the receipt,
    /// then empties the cart.
    ///
    /// Nothing is reserved unless the receipt file was written.
    fn finalize(&mut self) -> ShopResult<()> {
        let lines = self.cart.items();

        let receipt = receipt::render(self.config, &lines, Local::now().naive_local());
        receipt::save(&receipt, &self.config.receipt_path)?;

        for line in &lines {
            let remaining = self.inventory.decrement_quantity_for(line.id(), line.count());
            debug!(
                product_id = line.id(),
                reserved = line.count(),
                remaining = ?remaining,
                "Stock reserved"
            );
        }

        self.console.say(&receipt.text)?;

        info!(
            lines = lines.len(),
            total = %receipt.totals.total,
            "Checkout complete"
        );

        self.cart.clear();
        self.receipt = Some(receipt);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
