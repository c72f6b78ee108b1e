//! # Shopping State Machine
//!
//! The shopping flow as a typed state machine. [`transition`] is pure: it
//! takes the current state and one event and returns the next state plus the
//! side effects the caller must perform. The console driver in the shop app
//! gathers events (reads input, consults inventory) and executes effects.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Shopping Flow                                     │
//! │                                                                         │
//! │   ┌─────────┐ AisleChosen(n) ┌──────────────┐ ShelfStocked ┌─────────┐ │
//! │   │ Aisles  │───────────────►│ Shelf{n}     │─────────────►│AddItem  │ │
//! │   │         │  [LoadShelf]   │ (transient)  │              │  {n}    │ │
//! │   └────▲────┘                └──────────────┘              └──┬───┬──┘ │
//! │        │                          Select(k) [TryAdd / OutOfRange]  │   │ │
//! │        │                                      (stay) ◄─────────────┘   │ │
//! │        └────────────────────────── Back ──────────────────────────┘   │ │
//! │                                                                       │ │
//! │   ┌──────────┐ CheckoutRequested ┌─────────┐        Checkout         │ │
//! │   │ Checkout │──────────────────►│  Leave  │ ◄──────(from AddItem)───┘ │
//! │   │          │ [Farewell|Finalize]│(terminal)│                          │
//! │   └──────────┘                   └─────────┘                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The aisle being browsed travels inside `Shelf` and `AddItem`, so the shelf
//! cache is always filled and read for the same aisle.

use crate::types::AisleNumber;

/// Shelf listings are numbered for the shopper starting at this value.
pub const SHELF_NUMBER_OFFSET: usize = 1;

// =============================================================================
// State
// =============================================================================

/// Where the shopper currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopState {
    /// Looking at the aisle directory.
    Aisles,
    /// Walking into an aisle; its shelf is loaded if not cached yet.
    Shelf { aisle: AisleNumber },
    /// Standing at the shelf, picking items.
    AddItem { aisle: AisleNumber },
    /// At the register.
    Checkout,
    /// Gone home. Terminal.
    Leave,
}

impl ShopState {
    /// Whether the flow has finished.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ShopState::Leave)
    }
}

// =============================================================================
// Shelf Input
// =============================================================================

/// What the shopper typed while standing at a shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShelfCommand {
    /// `back` or `aisles`
    Back,
    /// `checkout` or `buy`
    Checkout,
    /// A shelf number as displayed (1-based). Out-of-range values are kept
    /// so the range check can report them.
    Select(usize),
    /// Anything else; the prompt is simply shown again.
    Unrecognized,
}

/// Parses a line typed at the shelf prompt.
///
/// Commands are case-insensitive and surrounding whitespace is ignored.
///
/// ## Example
/// ```rust
/// use grocer_core::session::{parse_shelf_command, ShelfCommand};
///
/// assert_eq!(parse_shelf_command(" BACK "), ShelfCommand::Back);
/// assert_eq!(parse_shelf_command("buy"), ShelfCommand::Checkout);
/// assert_eq!(parse_shelf_command("2"), ShelfCommand::Select(2));
/// assert_eq!(parse_shelf_command("two"), ShelfCommand::Unrecognized);
/// ```
pub fn parse_shelf_command(input: &str) -> ShelfCommand {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "back" | "aisles" => ShelfCommand::Back,
        "checkout" | "buy" => ShelfCommand::Checkout,
        digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            // Too many digits still counts as a number, just an impossible one
            ShelfCommand::Select(digits.parse().unwrap_or(usize::MAX))
        }
        _ => ShelfCommand::Unrecognized,
    }
}

// =============================================================================
// Events & Effects
// =============================================================================

/// Something that happened, as observed by the console driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopEvent {
    /// The store has no aisles to show.
    NoAisles,
    /// A valid aisle number was entered.
    AisleChosen(AisleNumber),
    /// The shelf for the current aisle is in the cache.
    ShelfStocked,
    /// A line was entered at the shelf prompt, with the shelf size at the time.
    ShelfInput {
        command: ShelfCommand,
        shelf_len: usize,
    },
    /// The register is ready; tells whether there is anything to ring up.
    CheckoutRequested { cart_empty: bool },
    /// The console has no more input. Whatever is in the cart gets rung up.
    InputClosed,
}

/// Work the driver must do as a result of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Make sure the shelf for `aisle` is cached.
    LoadShelf { aisle: AisleNumber },
    /// Try to put one unit of the listing at `index` (0-based) into the cart,
    /// subject to the stock admission rule.
    TryAdd { aisle: AisleNumber, index: usize },
    /// Tell the shopper the shelf number was outside `min..=max`.
    SelectionOutOfRange { min: usize, max: usize },
    /// Nothing bought: say farewell.
    Farewell,
    /// Reserve stock for every cart line, print the receipt, clear the cart.
    Finalize,
}

/// Computes the next state and the effects to run.
///
/// Events that make no sense in the current state leave it unchanged and
/// produce no effects.
///
/// ## Example
/// ```rust
/// use grocer_core::session::{transition, Effect, ShopEvent, ShopState};
///
/// let (next, effects) = transition(ShopState::Aisles, ShopEvent::AisleChosen(2));
/// assert_eq!(next, ShopState::Shelf { aisle: 2 });
/// assert_eq!(effects, vec![Effect::LoadShelf { aisle: 2 }]);
/// ```
pub fn transition(state: ShopState, event: ShopEvent) -> (ShopState, Vec<Effect>) {
    use ShopEvent as E;
    use ShopState as S;

    match (state, event) {
        (S::Aisles, E::NoAisles) => (S::Checkout, vec![]),
        (S::Aisles, E::AisleChosen(aisle)) => {
            (S::Shelf { aisle }, vec![Effect::LoadShelf { aisle }])
        }

        (S::Shelf { aisle }, E::ShelfStocked) => (S::AddItem { aisle }, vec![]),

        (S::AddItem { aisle }, E::ShelfInput { command, shelf_len }) => match command {
            ShelfCommand::Back => (S::Aisles, vec![]),
            ShelfCommand::Checkout => (S::Checkout, vec![]),
            ShelfCommand::Unrecognized => (state, vec![]),
            ShelfCommand::Select(number) => {
                let min = SHELF_NUMBER_OFFSET;
                let max = shelf_len + SHELF_NUMBER_OFFSET - 1;
                if number < min || number > max {
                    (state, vec![Effect::SelectionOutOfRange { min, max }])
                } else {
                    let index = number - SHELF_NUMBER_OFFSET;
                    (state, vec![Effect::TryAdd { aisle, index }])
                }
            }
        },

        (S::Aisles | S::Shelf { .. } | S::AddItem { .. }, E::InputClosed) => (S::Checkout, vec![]),

        (S::Checkout, E::CheckoutRequested { cart_empty: true }) => {
            (S::Leave, vec![Effect::Farewell])
        }
        (S::Checkout, E::CheckoutRequested { cart_empty: false }) => {
            (S::Leave, vec![Effect::Finalize])
        }

        (state, _) => (state, vec![]),
    }
}

// =============================================================================
// Stock Admission
// =============================================================================

/// Outcome of asking to put one more unit in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// There is stock beyond what the cart already holds.
    Admit,
    /// The cart already holds every unit on hand.
    MaxReached,
    /// The catalog has no quantity for this product.
    Unavailable,
}

/// The rule that keeps the cart from exceeding stock.
///
/// One more unit is admitted only while the units already in the cart are
/// strictly fewer than the live on-hand quantity.
///
/// ## Example
/// ```rust
/// use grocer_core::session::{admit, Admission};
///
/// assert_eq!(admit(0, Some(1)), Admission::Admit);
/// assert_eq!(admit(1, Some(1)), Admission::MaxReached);
/// assert_eq!(admit(0, None), Admission::Unavailable);
/// ```
pub fn admit(in_cart: i64, on_hand: Option<i64>) -> Admission {
    match on_hand {
        None => Admission::Unavailable,
        Some(available) if in_cart < available => Admission::Admit,
        Some(_) => Admission::MaxReached,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn shelf(command: ShelfCommand, shelf_len: usize) -> ShopEvent {
        ShopEvent::ShelfInput { command, shelf_len }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_shelf_command("back"), ShelfCommand::Back);
        assert_eq!(parse_shelf_command("Aisles\n"), ShelfCommand::Back);
        assert_eq!(parse_shelf_command("CHECKOUT"), ShelfCommand::Checkout);
        assert_eq!(parse_shelf_command("buy"), ShelfCommand::Checkout);
        assert_eq!(parse_shelf_command("12"), ShelfCommand::Select(12));
        assert_eq!(parse_shelf_command("0"), ShelfCommand::Select(0));
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        assert_eq!(parse_shelf_command(""), ShelfCommand::Unrecognized);
        assert_eq!(parse_shelf_command("-1"), ShelfCommand::Unrecognized);
        assert_eq!(parse_shelf_command("1.5"), ShelfCommand::Unrecognized);
        assert_eq!(parse_shelf_command("milk"), ShelfCommand::Unrecognized);
    }

    #[test]
    fn test_parse_huge_number_is_out_of_range_select() {
        let cmd = parse_shelf_command("99999999999999999999999999");
        assert_eq!(cmd, ShelfCommand::Select(usize::MAX));
        let (_, effects) = transition(ShopState::AddItem { aisle: 1 }, shelf(cmd, 4));
        assert_eq!(effects, vec![Effect::SelectionOutOfRange { min: 1, max: 4 }]);
    }

    #[test]
    fn test_aisle_choice_moves_to_shelf_and_loads_it() {
        let (next, effects) = transition(ShopState::Aisles, ShopEvent::AisleChosen(3));
        assert_eq!(next, ShopState::Shelf { aisle: 3 });
        assert_eq!(effects, vec![Effect::LoadShelf { aisle: 3 }]);

        let (next, effects) = transition(next, ShopEvent::ShelfStocked);
        assert_eq!(next, ShopState::AddItem { aisle: 3 });
        assert!(effects.is_empty());
    }

    #[test]
    fn test_select_maps_display_number_to_index() {
        let state = ShopState::AddItem { aisle: 2 };
        let (next, effects) = transition(state, shelf(ShelfCommand::Select(1), 4));
        assert_eq!(next, state);
        assert_eq!(effects, vec![Effect::TryAdd { aisle: 2, index: 0 }]);

        let (_, effects) = transition(state, shelf(ShelfCommand::Select(4), 4));
        assert_eq!(effects, vec![Effect::TryAdd { aisle: 2, index: 3 }]);
    }

    #[test]
    fn test_select_out_of_range_stays_put() {
        let state = ShopState::AddItem { aisle: 2 };
        for number in [0, 5, 100] {
            let (next, effects) = transition(state, shelf(ShelfCommand::Select(number), 4));
            assert_eq!(next, state);
            assert_eq!(effects, vec![Effect::SelectionOutOfRange { min: 1, max: 4 }]);
        }
    }

    #[test]
    fn test_unrecognized_input_is_ignored() {
        let state = ShopState::AddItem { aisle: 1 };
        let (next, effects) = transition(state, shelf(ShelfCommand::Unrecognized, 4));
        assert_eq!(next, state);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_back_and_checkout_from_shelf() {
        let state = ShopState::AddItem { aisle: 1 };
        assert_eq!(transition(state, shelf(ShelfCommand::Back, 4)).0, ShopState::Aisles);
        assert_eq!(transition(state, shelf(ShelfCommand::Checkout, 4)).0, ShopState::Checkout);
    }

    #[test]
    fn test_checkout_outcomes() {
        let (next, effects) = transition(
            ShopState::Checkout,
            ShopEvent::CheckoutRequested { cart_empty: true },
        );
        assert_eq!(next, ShopState::Leave);
        assert_eq!(effects, vec![Effect::Farewell]);

        let (next, effects) = transition(
            ShopState::Checkout,
            ShopEvent::CheckoutRequested { cart_empty: false },
        );
        assert_eq!(next, ShopState::Leave);
        assert_eq!(effects, vec![Effect::Finalize]);
        assert!(next.is_terminal());
    }

    #[test]
    fn test_no_aisles_goes_to_checkout() {
        assert_eq!(transition(ShopState::Aisles, ShopEvent::NoAisles).0, ShopState::Checkout);
    }

    #[test]
    fn test_closed_input_heads_to_checkout() {
        for state in [
            ShopState::Aisles,
            ShopState::Shelf { aisle: 1 },
            ShopState::AddItem { aisle: 1 },
        ] {
            assert_eq!(transition(state, ShopEvent::InputClosed), (ShopState::Checkout, vec![]));
        }
        assert_eq!(transition(ShopState::Leave, ShopEvent::InputClosed).0, ShopState::Leave);
    }

    #[test]
    fn test_mismatched_events_do_nothing() {
        let (next, effects) = transition(ShopState::Leave, ShopEvent::AisleChosen(1));
        assert_eq!(next, ShopState::Leave);
        assert!(effects.is_empty());

        let (next, _) = transition(ShopState::Aisles, ShopEvent::ShelfStocked);
        assert_eq!(next, ShopState::Aisles);
    }

    #[test]
    fn test_admission_rule() {
        assert_eq!(admit(0, Some(20)), Admission::Admit);
        assert_eq!(admit(19, Some(20)), Admission::Admit);
        assert_eq!(admit(20, Some(20)), Admission::MaxReached);
        assert_eq!(admit(0, Some(0)), Admission::MaxReached);
        assert_eq!(admit(3, None), Admission::Unavailable);
    }
}
