//! The calculator state machine.
//!
//! [`Calculator`] owns the accumulator, the pending operand and operator, and
//! the two flags that decide how the next key press is interpreted. All state
//! changes go through [`Calculator::handle`].

use serde::Serialize;
use tracing::debug;

use super::error::CalcError;
use super::evaluation::{
    PRECISION, apply_function, compute, number_to_input, parse_operand, round_significant,
};
use super::event::{Digit, Event, Operator, UnaryFunction};
use super::format::format_display;

/// Sentinel stored in the accumulator after a failed calculation.
pub const ERROR_TEXT: &str = "Error";

/// Longest input string the user can type.
pub const MAX_INPUT_LEN: usize = 15;

/// Snapshot of the engine state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CalculatorState {
    /// The value being typed or the last result.
    pub current_input: String,
    /// Left operand of the pending operation.
    pub previous_input: Option<String>,
    pub operator: Option<Operator>,
    /// The next digit starts a fresh number instead of appending.
    pub should_reset_display: bool,
    /// The last event selected an operator.
    pub last_action_was_operator: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            current_input: "0".to_string(),
            previous_input: None,
            operator: None,
            should_reset_display: false,
            last_action_was_operator: false,
        }
    }
}

/// A single calculator session.
#[derive(Clone, Debug, Default)]
pub struct Calculator {
    state: CalculatorState,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// The raw accumulator string.
    pub fn current_input(&self) -> &str {
        &self.state.current_input
    }

    pub fn is_error(&self) -> bool {
        self.state.current_input == ERROR_TEXT
    }

    /// The formatted display for the current state.
    pub fn display(&self) -> String {
        format_display(&self.state.current_input)
    }

    /// Process one key press and return the new display text.
    pub fn handle(&mut self, event: Event) -> String {
        if self.is_error() && event != Event::Clear {
            debug!(?event, "recovering from error state");
            self.reset();
        }

        let outcome = match event {
            Event::Digit(digit) => {
                self.input_digit(digit);
                Ok(())
            }
            Event::Decimal => {
                self.input_decimal();
                Ok(())
            }
            Event::Operator(op) => self.select_operator(op),
            Event::Equals => {
                self.equals();
                Ok(())
            }
            Event::Clear => {
                self.reset();
                Ok(())
            }
            Event::ToggleSign => self.toggle_sign(),
            Event::Percentage => self.percentage(),
            Event::Function(function) => self.apply(function),
        };

        if let Err(err) = outcome {
            self.enter_error(&err);
            return ERROR_TEXT.to_string();
        }

        self.display()
    }

    /// Reset everything to the power-on state.
    pub fn reset(&mut self) {
        self.state = CalculatorState::default();
    }

    fn input_digit(&mut self, digit: Digit) {
        let state = &mut self.state;
        if state.current_input == "0" || state.should_reset_display {
            state.current_input = digit.as_char().to_string();
            state.should_reset_display = false;
        } else if state.current_input.len() < MAX_INPUT_LEN {
            state.current_input.push(digit.as_char());
        }
        state.last_action_was_operator = false;
    }

    fn input_decimal(&mut self) {
        let state = &mut self.state;
        if state.should_reset_display {
            state.current_input = "0.".to_string();
            state.should_reset_display = false;
        } else if !state.current_input.contains('.') && state.current_input.len() < MAX_INPUT_LEN {
            state.current_input.push('.');
        }
        state.last_action_was_operator = false;
    }

    fn select_operator(&mut self, op: Operator) -> Result<(), CalcError> {
        let state = &mut self.state;

        if state.last_action_was_operator && state.previous_input.is_some() {
            // Repeated operator press: the latest one wins.
            state.operator = Some(op);
            return Ok(());
        }

        if let (Some(pending), Some(previous)) = (state.operator, state.previous_input.as_deref())
            && !state.should_reset_display
        {
            let result = number_to_input(compute(previous, &state.current_input, Some(pending))?);
            debug!(%pending, %result, "chained calculation");
            state.previous_input = Some(result.clone());
            state.current_input = result;
        } else {
            state.previous_input = Some(state.current_input.clone());
        }

        state.operator = Some(op);
        state.should_reset_display = true;
        state.last_action_was_operator = true;
        Ok(())
    }

    fn equals(&mut self) {
        let state = &mut self.state;

        if let (Some(op), Some(previous)) = (state.operator, state.previous_input.as_deref()) {
            state.current_input = match compute(previous, &state.current_input, Some(op)) {
                Ok(result) => number_to_input(result),
                Err(err) => {
                    debug!(error = %err, "calculation failed");
                    ERROR_TEXT.to_string()
                }
            };
            state.operator = None;
            state.previous_input = None;
            state.should_reset_display = true;
        }
        state.last_action_was_operator = false;
    }

    fn toggle_sign(&mut self) -> Result<(), CalcError> {
        let state = &mut self.state;
        if state.current_input != "0" {
            let value = parse_operand(&state.current_input)?;
            state.current_input = number_to_input(round_significant(-value, PRECISION));
            // Typing onto an exponent literal would corrupt it.
            if state.current_input.contains('e') {
                state.should_reset_display = true;
            }
        }
        state.last_action_was_operator = false;
        Ok(())
    }

    fn percentage(&mut self) -> Result<(), CalcError> {
        let state = &mut self.state;
        let value = parse_operand(&state.current_input)?;
        state.current_input = number_to_input(round_significant(value / 100.0, PRECISION));
        state.should_reset_display = true;
        state.last_action_was_operator = false;
        Ok(())
    }

    fn apply(&mut self, function: UnaryFunction) -> Result<(), CalcError> {
        let state = &mut self.state;
        let value = parse_operand(&state.current_input)?;
        let result = apply_function(function, value)?;
        state.current_input = number_to_input(round_significant(result, PRECISION));
        state.should_reset_display = true;
        state.last_action_was_operator = false;
        Ok(())
    }

    fn enter_error(&mut self, err: &CalcError) {
        debug!(error = %err, "entering error state");
        self.state = CalculatorState {
            current_input: ERROR_TEXT.to_string(),
            ..CalculatorState::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digit(d: u8) -> Event {
        Event::Digit(Digit::new(d).unwrap())
    }

    fn press(calc: &mut Calculator, events: &[Event]) -> String {
        let mut display = calc.display();
        for &event in events {
            display = calc.handle(event);
        }
        display
    }

    #[test]
    fn test_initial_state() {
        let calc = Calculator::new();
        assert_eq!(calc.current_input(), "0");
        assert_eq!(calc.display(), "0");
        assert_eq!(calc.state(), &CalculatorState::default());
    }

    #[test]
    fn test_digits_concatenate() {
        let mut calc = Calculator::new();
        let display = press(&mut calc, &[digit(1), digit(2), digit(3)]);
        assert_eq!(display, "123");
        assert_eq!(calc.current_input(), "123");
    }

    #[test]
    fn test_leading_zero_replaced() {
        let mut calc = Calculator::new();
        press(&mut calc, &[digit(0), digit(0), digit(7)]);
        assert_eq!(calc.current_input(), "7");
    }

    #[test]
    fn test_input_length_limit() {
        let mut calc = Calculator::new();
        for _ in 0..20 {
            calc.handle(digit(9));
        }
        assert_eq!(calc.current_input(), "9".repeat(MAX_INPUT_LEN));
    }

    #[test]
    fn test_decimal_point() {
        let mut calc = Calculator::new();
        press(&mut calc, &[digit(1), Event::Decimal, digit(5), Event::Decimal, digit(2)]);
        assert_eq!(calc.current_input(), "1.52");
        assert_eq!(calc.display(), "1.52");
    }

    #[test]
    fn test_decimal_after_operator_starts_fresh() {
        let mut calc = Calculator::new();
        press(&mut calc, &[digit(4), Event::Operator(Operator::Add), Event::Decimal]);
        assert_eq!(calc.current_input(), "0.");
        press(&mut calc, &[digit(5), Event::Equals]);
        assert_eq!(calc.display(), "4.5");
    }

    #[test]
    fn test_simple_addition() {
        let mut calc = Calculator::new();
        let display = press(
            &mut calc,
            &[digit(2), Event::Operator(Operator::Add), digit(3), Event::Equals],
        );
        assert_eq!(display, "5");
        assert!(calc.state().operator.is_none());
        assert!(calc.state().previous_input.is_none());
        assert!(calc.state().should_reset_display);
    }

    #[test]
    fn test_repeated_operator_replaces() {
        let mut calc = Calculator::new();
        let display = press(
            &mut calc,
            &[
                digit(5),
                Event::Operator(Operator::Add),
                Event::Operator(Operator::Add),
                digit(3),
                Event::Equals,
            ],
        );
        assert_eq!(display, "8");

        let display = press(
            &mut calc,
            &[
                Event::Clear,
                digit(5),
                Event::Operator(Operator::Multiply),
                Event::Operator(Operator::Subtract),
                digit(3),
                Event::Equals,
            ],
        );
        assert_eq!(display, "2");
    }

    #[test]
    fn test_chained_operations() {
        let mut calc = Calculator::new();
        let display = press(
            &mut calc,
            &[
                digit(2),
                Event::Operator(Operator::Add),
                digit(3),
                Event::Operator(Operator::Multiply),
            ],
        );
        assert_eq!(display, "5");
        assert_eq!(calc.state().previous_input.as_deref(), Some("5"));

        let display = press(&mut calc, &[digit(4), Event::Equals]);
        assert_eq!(display, "20");
    }

    #[test]
    fn test_divide_by_zero() {
        let mut calc = Calculator::new();
        let display = press(
            &mut calc,
            &[digit(5), Event::Operator(Operator::Divide), digit(0), Event::Equals],
        );
        assert_eq!(display, "Error");
        assert!(calc.is_error());

        assert_eq!(calc.handle(Event::Clear), "0");
        assert!(!calc.is_error());
    }

    #[test]
    fn test_chained_divide_by_zero_stops() {
        let mut calc = Calculator::new();
        let display = press(
            &mut calc,
            &[
                digit(5),
                Event::Operator(Operator::Divide),
                digit(0),
                Event::Operator(Operator::Add),
            ],
        );
        assert_eq!(display, "Error");
        assert!(calc.state().operator.is_none());
        assert!(calc.state().previous_input.is_none());
    }

    #[test]
    fn test_error_recovers_on_next_event() {
        let mut calc = Calculator::new();
        press(
            &mut calc,
            &[digit(1), Event::Operator(Operator::Divide), digit(0), Event::Equals],
        );
        assert_eq!(calc.handle(digit(7)), "7");
        assert_eq!(calc.state().operator, None);

        press(
            &mut calc,
            &[Event::Operator(Operator::Divide), digit(0), Event::Equals],
        );
        // Operator after an error acts on a fresh "0".
        assert_eq!(calc.handle(Event::Operator(Operator::Add)), "0");
        assert_eq!(calc.state().previous_input.as_deref(), Some("0"));
    }

    #[test]
    fn test_equals_without_operator() {
        let mut calc = Calculator::new();
        let display = press(&mut calc, &[digit(4), digit(2), Event::Equals]);
        assert_eq!(display, "42");
        assert!(!calc.state().should_reset_display);
    }

    #[test]
    fn test_equals_reuses_current_as_right_operand() {
        let mut calc = Calculator::new();
        let display = press(&mut calc, &[digit(5), Event::Operator(Operator::Add), Event::Equals]);
        assert_eq!(display, "10");
    }

    #[test]
    fn test_new_number_after_equals() {
        let mut calc = Calculator::new();
        press(
            &mut calc,
            &[digit(2), Event::Operator(Operator::Add), digit(3), Event::Equals],
        );
        assert_eq!(calc.handle(digit(9)), "9");
    }

    #[test]
    fn test_toggle_sign() {
        let mut calc = Calculator::new();
        assert_eq!(calc.handle(Event::ToggleSign), "0");
        assert_eq!(calc.current_input(), "0");

        press(&mut calc, &[digit(1), digit(2)]);
        assert_eq!(calc.handle(Event::ToggleSign), "-12");
        assert_eq!(calc.handle(Event::ToggleSign), "12");
    }

    #[test]
    fn test_toggle_sign_keeps_appending() {
        let mut calc = Calculator::new();
        press(&mut calc, &[digit(5), Event::ToggleSign, digit(6)]);
        assert_eq!(calc.current_input(), "-56");
    }

    #[test]
    fn test_toggle_sign_on_tiny_value_starts_fresh_number() {
        let mut calc = Calculator::new();
        let mut events = vec![Event::Decimal];
        events.extend(std::iter::repeat_n(digit(0), 6));
        events.push(digit(1));
        press(&mut calc, &events);

        assert_eq!(calc.handle(Event::ToggleSign), "-1.000000e-7");
        assert_eq!(calc.current_input(), "-1e-7");

        for event in [digit(5), Event::Decimal, digit(2)] {
            calc.handle(event);
            assert!(calc.current_input().parse::<f64>().is_ok());
            assert!(!calc.is_error());
        }
        assert_eq!(calc.current_input(), "5.2");
    }

    #[test]
    fn test_toggle_sign_rounds_to_precision() {
        let mut calc = Calculator::new();
        for d in [1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 1, 2, 3, 4, 5] {
            calc.handle(digit(d));
        }
        assert_eq!(calc.current_input(), "123456789012345");
        calc.handle(Event::ToggleSign);
        assert_eq!(calc.current_input(), "-123456789012000");
    }

    #[test]
    fn test_toggle_sign_on_result() {
        let mut calc = Calculator::new();
        press(
            &mut calc,
            &[digit(2), Event::Operator(Operator::Add), digit(3), Event::Equals],
        );
        assert_eq!(calc.handle(Event::ToggleSign), "-5");
        assert!(calc.state().should_reset_display);
        assert_eq!(calc.handle(digit(7)), "7");
    }

    #[test]
    fn test_decimal_ignored_at_length_limit() {
        let mut calc = Calculator::new();
        for _ in 0..MAX_INPUT_LEN {
            calc.handle(digit(4));
        }
        calc.handle(Event::Decimal);
        assert_eq!(calc.current_input(), "4".repeat(MAX_INPUT_LEN));
    }

    #[test]
    fn test_chained_overflow_is_error() {
        let mut calc = Calculator::new();
        let nines = vec![digit(9); MAX_INPUT_LEN];
        press(&mut calc, &nines);
        for _ in 0..4 {
            calc.handle(Event::Function(UnaryFunction::Square));
        }
        assert_eq!(calc.current_input(), "1e240");
        calc.handle(Event::Operator(Operator::Multiply));

        for _ in 0..4 {
            press(&mut calc, &nines);
            assert_ne!(calc.handle(Event::Operator(Operator::Multiply)), "Error");
        }
        assert_eq!(calc.current_input(), "1e300");

        press(&mut calc, &nines);
        assert_eq!(calc.handle(Event::Operator(Operator::Multiply)), "Error");
        assert!(calc.is_error());
        assert!(calc.state().previous_input.is_none());
    }

    #[test]
    fn test_percentage() {
        let mut calc = Calculator::new();
        let display = press(&mut calc, &[digit(5), digit(0), Event::Percentage]);
        assert_eq!(display, "0.5");
        assert!(calc.state().should_reset_display);
        assert_eq!(calc.handle(digit(3)), "3");
    }

    #[test]
    fn test_percentage_of_zero() {
        let mut calc = Calculator::new();
        assert_eq!(calc.handle(Event::Percentage), "0");
    }

    #[test]
    fn test_sqrt_and_domain_error() {
        let mut calc = Calculator::new();
        let display = press(&mut calc, &[digit(9), Event::Function(UnaryFunction::Sqrt)]);
        assert_eq!(display, "3");

        let display = press(
            &mut calc,
            &[
                Event::Clear,
                digit(9),
                Event::ToggleSign,
                Event::Function(UnaryFunction::Sqrt),
            ],
        );
        assert_eq!(display, "Error");
        assert!(calc.is_error());
    }

    #[test]
    fn test_function_result_starts_fresh_number() {
        let mut calc = Calculator::new();
        press(&mut calc, &[digit(4), Event::Function(UnaryFunction::Square)]);
        assert_eq!(calc.current_input(), "16");
        assert_eq!(calc.handle(digit(2)), "2");
    }

    #[test]
    fn test_function_then_operator_uses_result() {
        let mut calc = Calculator::new();
        let display = press(
            &mut calc,
            &[
                digit(9),
                Event::Function(UnaryFunction::Sqrt),
                Event::Operator(Operator::Add),
                digit(1),
                Event::Equals,
            ],
        );
        assert_eq!(display, "4");
    }

    #[test]
    fn test_log_of_zero_is_error() {
        let mut calc = Calculator::new();
        assert_eq!(calc.handle(Event::Function(UnaryFunction::Log)), "Error");
    }

    #[test]
    fn test_exp_overflow_is_error() {
        let mut calc = Calculator::new();
        let display = press(
            &mut calc,
            &[
                digit(9),
                digit(9),
                digit(9),
                Event::Function(UnaryFunction::Exp),
            ],
        );
        assert_eq!(display, "Error");
    }

    #[test]
    fn test_small_result_renders_exponential() {
        let mut calc = Calculator::new();
        let mut events = vec![digit(0), Event::Decimal];
        events.extend(std::iter::repeat_n(digit(0), 6));
        events.extend([digit(1), digit(2), digit(3)]);
        let display = press(&mut calc, &events);
        assert_eq!(calc.current_input(), "0.000000123");
        assert_eq!(display, "1.230000e-7");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut calc = Calculator::new();
        press(&mut calc, &[digit(3), Event::Operator(Operator::Multiply), digit(4)]);
        calc.handle(Event::Clear);
        assert_eq!(calc.state(), &CalculatorState::default());
    }
}
