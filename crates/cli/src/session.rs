use std::io::{self, BufRead, Write};

use shopcart_core::{
    parse_product_id, parse_quantity, Cart, Catalog, DomainError, MenuChoice, Money, Product,
    SessionState, SessionTransitionError,
};
use thiserror::Error;
use tracing::{debug, info, warn};

const TITLE: &str = "E-commerce Platform";
const INVALID_CHOICE: &str = "Invalid choice. Please enter a valid option.";
const PRODUCT_ID_PROMPT: &str = "Enter the product ID to add to your cart: ";
const TOO_MANY_ATTEMPTS: &str = "Too many invalid entries.";
const FAREWELL: &str = "Exiting E-commerce Platform. Goodbye!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The shopper chose Exit from the menu.
    Exited,
    /// Standard input ended before Exit was chosen.
    InputClosed,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to read session input: {0}")]
    Read(#[source] io::Error),
    #[error("failed to write session output: {0}")]
    Write(#[source] io::Error),
    #[error(transparent)]
    Transition(#[from] SessionTransitionError),
}

impl SessionError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Read(_) | Self::Write(_) => "session_io",
            Self::Transition(_) => "session_state",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Read(_) | Self::Write(_) => 3,
            Self::Transition(_) => 5,
        }
    }
}

/// One catalog entry as printed in product listings: `<id>. <name> - $<price>`.
pub fn product_line(product: &Product) -> String {
    format!("{}. {} - {}", product.id, product.name, Money(product.price))
}

enum Step {
    Continue,
    InputClosed,
}

enum Prompted<T> {
    Value(T),
    /// Well-formed input the shop cannot act on, reported once without a retry.
    Rejected(DomainError),
    Exhausted,
    Closed,
}

/// Blocking menu loop over a line-oriented reader and a writer.
pub struct Session<'a, R, W> {
    catalog: &'a Catalog,
    cart: Cart<'a>,
    state: SessionState,
    input: R,
    output: W,
    max_input_attempts: u32,
}

impl<'a, R, W> Session<'a, R, W>
where
    R: BufRead,
    W: Write,
{
    pub fn new(catalog: &'a Catalog, input: R, output: W, max_input_attempts: u32) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            state: SessionState::initial(),
            input,
            output,
            max_input_attempts: max_input_attempts.max(1),
        }
    }

    pub fn cart(&self) -> &Cart<'a> {
        &self.cart
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn run(&mut self) -> Result<SessionOutcome, SessionError> {
        debug!(event_name = "session.started", products = self.catalog.len(), "session started");

        let mut outcome = SessionOutcome::Exited;
        while !self.state.is_terminal() {
            self.render_menu()?;
            let Some(line) = self.read_line()? else {
                outcome = self.close(SessionOutcome::InputClosed)?;
                continue;
            };

            let choice = match MenuChoice::parse(&line) {
                Ok(choice) => choice,
                Err(error) => {
                    debug!(event_name = "session.menu.invalid_choice", %error, "menu choice rejected");
                    self.say(INVALID_CHOICE)?;
                    continue;
                }
            };

            if let Some(finished) = self.dispatch(choice)? {
                outcome = finished;
            }
        }

        Ok(outcome)
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<Option<SessionOutcome>, SessionError> {
        self.state = self.state.select(choice)?;
        debug!(event_name = "session.menu.selected", state = ?self.state, "menu choice accepted");

        let step = match self.state {
            SessionState::Browse => {
                self.render_products()?;
                Step::Continue
            }
            SessionState::AddToCart => self.add_to_cart()?,
            SessionState::ViewCart => {
                self.render_cart()?;
                Step::Continue
            }
            SessionState::Checkout => self.checkout()?,
            SessionState::Exit => return self.close(SessionOutcome::Exited).map(Some),
            SessionState::Menu => Step::Continue,
        };

        match step {
            Step::Continue => {
                self.state = self.state.complete()?;
                Ok(None)
            }
            Step::InputClosed => self.close(SessionOutcome::InputClosed).map(Some),
        }
    }

    fn add_to_cart(&mut self) -> Result<Step, SessionError> {
        self.render_products()?;

        let requested = match self.prompt_number(PRODUCT_ID_PROMPT, parse_product_id)? {
            Prompted::Value(product_id) => Ok(product_id),
            Prompted::Rejected(error) => Err(error),
            Prompted::Exhausted => return Ok(Step::Continue),
            Prompted::Closed => return Ok(Step::InputClosed),
        };

        let catalog = self.catalog;
        let product = match requested.and_then(|product_id| catalog.require(product_id)) {
            Ok(product) => product,
            Err(error) => {
                self.report(&error)?;
                return Ok(Step::Continue);
            }
        };

        let quantity = match self.prompt_number("Enter the quantity: ", parse_quantity)? {
            Prompted::Value(quantity) => quantity,
            Prompted::Rejected(error) => {
                self.report(&error)?;
                return Ok(Step::Continue);
            }
            Prompted::Exhausted => return Ok(Step::Continue),
            Prompted::Closed => return Ok(Step::InputClosed),
        };

        match self.cart.add(product, quantity) {
            Ok(line_quantity) => {
                info!(
                    event_name = "session.cart.line_added",
                    product_id = %product.id,
                    quantity,
                    line_quantity,
                    "cart line updated"
                );
                self.say(&format!("{quantity} {}(s) added to the cart.", product.name))?;
            }
            Err(error) => self.report(&error)?,
        }

        Ok(Step::Continue)
    }

    fn checkout(&mut self) -> Result<Step, SessionError> {
        self.render_cart()?;
        self.prompt("Proceed to checkout? (yes/no): ")?;

        let Some(answer) = self.read_line()? else {
            debug!(event_name = "session.checkout.abandoned", "input closed during checkout");
            return Ok(Step::InputClosed);
        };

        if answer.trim().eq_ignore_ascii_case("yes") {
            let total = self.cart.total();
            let items = self.cart.item_count();
            self.cart.clear();
            info!(
                event_name = "session.checkout.completed",
                items,
                total = %total,
                "checkout completed"
            );
            self.say("Checkout completed. Thank you for shopping with us!")?;
        } else {
            debug!(event_name = "session.checkout.cancelled", "checkout cancelled");
            self.say("Checkout cancelled.")?;
        }

        Ok(Step::Continue)
    }

    fn prompt_number<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T, DomainError>,
    ) -> Result<Prompted<T>, SessionError> {
        for attempt in 1..=self.max_input_attempts {
            self.prompt(prompt)?;
            let Some(line) = self.read_line()? else {
                return Ok(Prompted::Closed);
            };

            match parse(&line) {
                Ok(value) => return Ok(Prompted::Value(value)),
                Err(error) if error.is_input_error() => {
                    debug!(event_name = "session.input.rejected", attempt, %error, "input rejected");
                    self.say(error.user_message())?;
                }
                Err(error) => return Ok(Prompted::Rejected(error)),
            }
        }

        self.say(TOO_MANY_ATTEMPTS)?;
        Ok(Prompted::Exhausted)
    }

    fn report(&mut self, error: &DomainError) -> Result<(), SessionError> {
        if error.is_recoverable() {
            info!(event_name = "session.request.rejected", %error, "shopper request rejected");
        } else {
            warn!(event_name = "session.request.failed", %error, "shopper request failed");
        }
        self.say(error.user_message())
    }

    fn render_menu(&mut self) -> Result<(), SessionError> {
        self.say(&format!("\n{TITLE}"))?;
        for choice in MenuChoice::ALL {
            self.say(&choice.to_string())?;
        }
        self.prompt("Enter your choice: ")
    }

    fn render_products(&mut self) -> Result<(), SessionError> {
        let catalog = self.catalog;
        self.say("\nProducts Available:")?;
        for product in catalog.list_all() {
            self.say(&product_line(product))?;
        }
        Ok(())
    }

    fn render_cart(&mut self) -> Result<(), SessionError> {
        if self.cart.is_empty() {
            return self.say("Your cart is empty.");
        }

        let mut rendered = vec!["\nYour Cart:".to_string()];
        rendered.extend(
            self.cart
                .lines()
                .map(|line| format!("{} - Quantity: {}", line.product.name, line.quantity)),
        );
        rendered.push(format!("Total: {}", Money(self.cart.total())));

        for line in rendered {
            self.say(&line)?;
        }
        Ok(())
    }

    fn close(&mut self, outcome: SessionOutcome) -> Result<SessionOutcome, SessionError> {
        if outcome == SessionOutcome::InputClosed {
            debug!(event_name = "session.input_closed", "standard input closed");
            self.say("")?;
        }
        self.state = SessionState::Exit;
        self.say(FAREWELL)?;
        debug!(event_name = "session.finished", outcome = ?outcome, "session finished");
        Ok(outcome)
    }

    fn read_line(&mut self) -> Result<Option<String>, SessionError> {
        let mut buffer = String::new();
        let read = self.input.read_line(&mut buffer).map_err(SessionError::Read)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(buffer.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    fn say(&mut self, line: &str) -> Result<(), SessionError> {
        writeln!(self.output, "{line}").map_err(SessionError::Write)
    }

    fn prompt(&mut self, text: &str) -> Result<(), SessionError> {
        write!(self.output, "{text}").map_err(SessionError::Write)?;
        self.output.flush().map_err(SessionError::Write)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use shopcart_core::{Catalog, ProductId, SessionState, SessionTransitionError};

    use super::{Session, SessionError, SessionOutcome};

    fn run_script(script: &str) -> (SessionOutcome, String) {
        let catalog = Catalog::new(Catalog::default_products()).expect("default catalog");
        let mut session = Session::new(&catalog, Cursor::new(script.as_bytes()), Vec::new(), 3);
        let outcome = session.run().expect("session should run");
        let output = String::from_utf8(session.into_output()).expect("utf8 output");
        (outcome, output)
    }

    #[test]
    fn exit_prints_farewell() {
        let (outcome, output) = run_script("5\n");

        assert_eq!(outcome, SessionOutcome::Exited);
        assert!(output.contains(
            "1. View Products\n2. Add to Cart\n3. View Cart\n4. Checkout\n5. Exit"
        ));
        assert!(output.ends_with("Exiting E-commerce Platform. Goodbye!\n"));
    }

    #[test]
    fn end_of_input_closes_cleanly() {
        let (outcome, output) = run_script("3\n");

        assert_eq!(outcome, SessionOutcome::InputClosed);
        assert!(output.contains("Your cart is empty."));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[test]
    fn invalid_choice_returns_to_menu() {
        let (_, output) = run_script("9\nhello\n5\n");

        assert_eq!(output.matches("Invalid choice. Please enter a valid option.").count(), 2);
        assert_eq!(output.matches("Enter your choice: ").count(), 3);
    }

    #[test]
    fn zero_and_negative_ids_are_absent_products() {
        for script in ["2\n0\n5\n", "2\n-1\n5\n", "2\n4294967296\n5\n"] {
            let (outcome, output) = run_script(script);

            assert_eq!(outcome, SessionOutcome::Exited);
            assert_eq!(output.matches("Product not found.").count(), 1, "script {script:?}");
            assert!(!output.contains("Please enter"), "script {script:?} should not re-prompt");
            assert!(!output.contains("Enter the quantity: "));
        }
    }

    #[test]
    fn state_errors_have_their_own_class() {
        let error = SessionError::from(SessionTransitionError::NotAtMenu(SessionState::Browse));

        assert_eq!(error.error_class(), "session_state");
        assert_eq!(error.exit_code(), 5);
        let io_error = SessionError::Write(std::io::Error::other("closed pipe"));
        assert_eq!(io_error.error_class(), "session_io");
        assert_eq!(io_error.exit_code(), 3);
    }

    #[test]
    fn cart_is_visible_while_session_is_alive() {
        let catalog = Catalog::new(Catalog::default_products()).expect("default catalog");
        let mut session =
            Session::new(&catalog, Cursor::new(b"2\n3\n4\n".to_vec()), Vec::new(), 3);

        let outcome = session.run().expect("session should run");

        assert_eq!(outcome, SessionOutcome::InputClosed);
        assert_eq!(session.cart().quantity_of(ProductId(3)), 4);
        assert_eq!(session.state(), SessionState::Exit);
    }
}
