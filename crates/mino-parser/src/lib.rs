pub mod cursor;
pub mod parser;

pub use cursor::Cursor;
pub use parser::{check, Parser};

#[cfg(test)]
mod tests {
    use super::*;
    use mino_lexer::Lexer;
    use mino_syntax::{ParseResult, Token, TokenKind};

    fn check_str(input: &str) -> ParseResult {
        let tokens = Lexer::new(input).tokenize();
        check(tokens)
    }

    fn assert_ok(input: &str) {
        let result = check_str(input);
        assert!(
            result.ok,
            "expected clean parse of {:?}, got {:?}",
            input, result.errors
        );
    }

    // === Soundness on valid input ===

    #[test]
    fn empty_function_parses() {
        assert_ok("fun f ( ) end");
    }

    #[test]
    fn while_with_empty_block_parses() {
        assert_ok("fun f ( ) while x > 0 loop end");
    }

    #[test]
    fn declarations_parse() {
        assert_ok("int count = 0;");
        assert_ok("string msg = \"hi\";");
        assert_ok("bool flag;");
        assert_ok("int[] xs = new int[10];");
        assert_ok("char[][] grid;");
    }

    #[test]
    fn functions_with_params_and_return_type_parse() {
        assert_ok("fun sum(a : int, b : int) : int return a + b; end");
        assert_ok("fun noop() return; end");
        assert_ok("fun first(xs : int[]) : int return xs[0]; end");
    }

    #[test]
    fn statements_parse() {
        assert_ok(
            "fun main()\n\
             int i = 0;\n\
             while i < 10\n\
               if i == 5\n\
                 done(i);\n\
               end\n\
               xs[i] = sum(i, 2 * i);\n\
               i = i + 1;\n\
             loop\n\
             end",
        );
    }

    #[test]
    fn else_if_chain_parses() {
        assert_ok(
            "fun classify(i : int)\n\
             if flag and not (i == 0) or i >= 5\n\
               m = 1;\n\
             else if i <> 0\n\
               m = 2;\n\
             else\n\
               m = 3;\n\
             end\n\
             end",
        );
    }

    #[test]
    fn expression_forms_parse() {
        assert_ok("int a = 1 + 2 * 3 - x / y;");
        assert_ok("int b = 0x1F;");
        assert_ok("int c = 3.14;");
        assert_ok("bool d = not done and x <= 3 or y <> z;");
        assert_ok("int e = f(g(1), h[2], -3);");
        assert_ok("int g = ((1));");
    }

    #[test]
    fn full_program_parses() {
        assert_ok(
            "# running totals\n\
             int total = 0;\n\
             fun add(a : int, b : int) : int\n\
               return a + b;\n\
             end\n\
             fun main()\n\
               int i = 0;\n\
               while i < 100\n\
                 total = add(total, i);\n\
                 i = i + 1;\n\
               loop\n\
             end",
        );
    }

    // === Completeness of detection ===

    #[test]
    fn missing_param_comma_is_one_error_at_offending_line() {
        let result = check_str("fun f ( x : int\n y : int ) end");
        assert!(!result.ok);
        assert_eq!(result.errors.len(), 1, "got {:?}", result.errors);
        assert_eq!(result.errors[0].line, 2);
        assert!(result.errors[0].message.contains("',' or ')'"));
    }

    #[test]
    fn missing_rhs_is_one_error_and_semicolon_still_terminates() {
        let result = check_str("fun f ( )\n x = ;\n y = 1;\n end");
        assert!(!result.ok);
        assert_eq!(result.errors.len(), 1, "got {:?}", result.errors);
        assert_eq!(result.errors[0].line, 2);
        assert!(result.errors[0].message.contains("expected an expression"));
        assert!(result.errors[0].message.contains("';'"));
    }

    #[test]
    fn missing_paren_in_function_header_is_one_error() {
        let result = check_str("fun f ) end");
        assert_eq!(result.errors.len(), 1, "got {:?}", result.errors);
        assert!(result.errors[0].message.contains("expected '('"));
    }

    #[test]
    fn brace_block_reports_missing_end_and_later_declarations_are_still_checked() {
        let result = check_str(
            "fun f ( ) if x > 0 { y = x; } end\n\
             fun g ( a : int\n b : int ) end",
        );
        assert!(!result.ok);
        assert!(result.errors[0].message.contains("expected 'end'"));
        // the independent error in g's parameter list is still found
        assert!(result
            .errors
            .iter()
            .any(|e| e.line == 3 && e.message.contains("',' or ')'")));
    }

    #[test]
    fn missing_loop_terminator_is_named_after_the_token_kind() {
        // the expected-side description comes from TokenKind::describe
        let result = check_str("fun f ( ) while x > 0 end");
        assert_eq!(result.errors.len(), 1, "got {:?}", result.errors);
        assert!(result.errors[0].message.contains("expected 'loop', found 'end'"));
        assert_eq!(
            result.errors[0].message,
            format!(
                "expected {}, found 'end'",
                mino_syntax::TokenKind::Loop.describe()
            )
        );
    }

    #[test]
    fn lexical_error_is_reported_and_recovered_from() {
        let result = check_str("fun f ( )\n x = @ ;\n y = 1;\n end");
        assert_eq!(result.errors.len(), 1, "got {:?}", result.errors);
        assert_eq!(result.errors[0].line, 2);
        assert!(result.errors[0].message.contains("unrecognized token '@'"));
    }

    #[test]
    fn lexical_error_at_top_level_is_reported() {
        let result = check_str("$\nfun f ( ) end");
        assert_eq!(result.errors.len(), 1, "got {:?}", result.errors);
        assert_eq!(result.errors[0].line, 1);
    }

    #[test]
    fn empty_input_expects_a_declaration() {
        let result = check_str("");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0]
            .message
            .contains("expected a declaration, found end of input"));
    }

    #[test]
    fn reserved_for_keyword_is_rejected() {
        let result = check_str("fun f ( ) for i; end");
        assert!(!result.ok);
    }

    // === Multi-error discovery ===

    #[test]
    fn two_independent_errors_yield_two_diagnostics() {
        let result = check_str(
            "fun f ( )\n x = ;\n end\n\
             fun g ( )\n y = ;\n end",
        );
        assert_eq!(result.errors.len(), 2, "got {:?}", result.errors);
        assert_eq!(result.errors[0].line, 2);
        assert_eq!(result.errors[1].line, 5);
    }

    #[test]
    fn missing_semicolon_does_not_hide_next_statement_error() {
        let result = check_str("fun f ( )\n x = 1\n y = ;\n end");
        assert_eq!(result.errors.len(), 2, "got {:?}", result.errors);
        assert!(result.errors[0].message.contains("expected ';'"));
        assert_eq!(result.errors[1].line, 3);
    }

    // === Idempotence ===

    #[test]
    fn rerunning_on_identical_tokens_gives_identical_diagnostics() {
        let tokens = Lexer::new("fun f (\n x = ;\n int 3;\n }").tokenize();
        let first = check(tokens.clone());
        let second = check(tokens);
        assert_eq!(first, second);
    }

    // === Termination ===

    #[test]
    fn garbage_input_terminates() {
        let result = check_str(") ) ] , + * <> == ; } { ] )");
        assert!(!result.ok);
    }

    #[test]
    fn repeated_tokens_terminate() {
        let src = "fun ".repeat(200);
        let result = check_str(&src);
        assert!(!result.ok);
    }

    #[test]
    fn recovery_skip_budget_forces_end_of_stream() {
        // no declaration starter in 150 tokens of garbage: the skip cap
        // trips and the run ends with what it has
        let mut src = String::from("int x = 1;\n");
        src.push_str(&"+ ".repeat(150));
        src.push_str("\nint y = 1;");
        let result = check_str(&src);
        assert_eq!(result.errors.len(), 1, "got {:?}", result.errors);
        assert!(result.errors[0].message.contains("expected a declaration"));
    }

    #[test]
    fn nesting_ceiling_reports_once_and_stops() {
        let mut src = String::from("int x = ");
        src.push_str(&"(".repeat(1500));
        src.push('1');
        src.push_str(&")".repeat(1500));
        src.push(';');
        let result = check_str(&src);
        assert_eq!(result.errors.len(), 1, "got {:?}", result.errors);
        assert!(result.errors[0].message.contains("too deep"));
    }

    #[test]
    fn deeply_nested_but_legal_input_parses() {
        let mut src = String::from("int x = ");
        src.push_str(&"(".repeat(50));
        src.push('1');
        src.push_str(&")".repeat(50));
        src.push(';');
        assert_ok(&src);
    }

    // === Stream handling ===

    #[test]
    fn token_vector_without_eof_is_handled() {
        // TokenBuffer synthesizes the trailing Eof
        let tokens = vec![
            Token::new(TokenKind::KwInt, "int", 1),
            Token::new(TokenKind::Ident, "x", 1),
            Token::new(TokenKind::Semicolon, ";", 1),
        ];
        let result = check(tokens);
        assert!(result.ok, "got {:?}", result.errors);
    }

    #[test]
    fn truncated_input_reports_at_end_of_input() {
        let result = check_str("fun f ( ");
        assert!(!result.ok);
        assert!(result
            .errors
            .iter()
            .any(|e| e.message.contains("end of input")));
    }
}
