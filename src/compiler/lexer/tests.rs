use super::*;

fn types(source: &str) -> Vec<TokenType> {
    tokenize(source).unwrap().iter().map(Token::token_type).collect()
}

fn sources(source: &str) -> Vec<String> {
    tokenize(source).unwrap().iter().map(|token| token.source().to_owned()).collect()
}

mod scanning {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn single_character_tokens() {
        assert_eq!(vec![
            TokenType::ParenthesisLeft, TokenType::ParenthesisRight,
            TokenType::BracketLeft, TokenType::BracketRight,
            TokenType::Plus, TokenType::Minus, TokenType::Multiply, TokenType::Divide, TokenType::Modulo,
            TokenType::Assign, TokenType::Comma, TokenType::Colon,
            TokenType::Eof,
        ], types("( ) { } + - * / % = , :"));
    }

    #[test]
    fn declaration() {
        assert_eq!(vec![
            TokenType::Var, TokenType::Mut, TokenType::Identifier, TokenType::Assign, TokenType::Null, TokenType::Eof,
        ], types("var mut answer = null"));
        assert_eq!(vec!["var", "mut", "answer", "=", "null", ""], sources("var mut answer = null"));
    }

    #[test]
    fn numbers_are_digit_runs() {
        assert_eq!(vec!["12", "345", ""], sources("12 345"));
        assert_eq!(vec![TokenType::Number, TokenType::Identifier, TokenType::Eof], types("12abc"));
    }

    #[test]
    fn identifiers_stop_at_non_letters() {
        assert_eq!(vec!["foo", "1", "bar", ""], sources("foo1bar"));
    }

    #[test]
    fn keywords_match_exactly() {
        assert_eq!(vec![TokenType::Identifier, TokenType::Identifier, TokenType::Identifier, TokenType::Eof],
                   types("variable Var nulls"));
    }

    #[test]
    fn semicolons_are_dropped() {
        assert_eq!(types("var a = 1 a"), types("var a = 1; a;"));
    }

    #[test]
    fn empty_source() {
        assert_eq!(vec![TokenType::Eof], types(""));
        assert_eq!(vec![TokenType::Eof], types(" \n\t\r ;;"));
    }
}

mod comments {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn line_comment() {
        assert_eq!(types("1 + 1"), types("1 + 1 // ignored\n"));
    }

    #[test]
    fn block_comment_spans_lines() {
        assert_eq!(types("1 + 2"), types("1 /* one\ntwo */ + 2"));
    }

    #[test]
    fn block_comment_does_not_nest() {
        assert_eq!(types("1 * 2"), types("1 /* /* */ * 2"));
    }

    #[test]
    fn unterminated_block_comment_is_plain_operators() {
        assert_eq!(vec![TokenType::Number, TokenType::Divide, TokenType::Multiply, TokenType::Identifier, TokenType::Eof],
                   types("1 /* forever"));
    }

    #[test]
    fn line_comments_are_removed_first() {
        assert_eq!(vec![TokenType::Divide, TokenType::Multiply, TokenType::Identifier, TokenType::Eof],
                   types("/* a // b */ 1"));
    }

    #[test]
    fn stripping_keeps_positions() {
        assert_eq!(format!("1{}\n  2", " ".repeat(13)), strip_comments("1 /* ü */ // x\n  2"));

        let tokens = tokenize("/* one\ntwo */ x // y\n  z").unwrap();
        assert_eq!(TokenPos::new(2, 8), *tokens[0].start());
        assert_eq!(TokenPos::new(3, 3), *tokens[1].start());
    }
}

mod positions {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn tokens_track_line_and_column() {
        let tokens = tokenize("var a\n  = 1").unwrap();

        assert_eq!(TokenPos::new(1, 1), *tokens[0].start());
        assert_eq!(TokenPos::new(1, 4), *tokens[0].end());
        assert_eq!(TokenPos::new(1, 5), *tokens[1].start());
        assert_eq!(TokenPos::new(2, 3), *tokens[2].start());
        assert_eq!(TokenPos::new(2, 5), *tokens[3].start());
    }
}

mod errors {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn unexpected_character() {
        let err = tokenize("var a = 1\nvar b = #").unwrap_err();

        assert_eq!(LexerError::UnexpectedCharacter(TokenPos::new(2, 9), '#'), err);
        assert_eq!("[line 2 column 9] Unexpected character '#'", err.to_string());
    }

    #[test]
    fn underscore_is_not_a_letter() {
        assert!(matches!(tokenize("my_var"), Err(LexerError::UnexpectedCharacter(_, '_'))));
    }

    #[test]
    fn decimal_point_is_rejected() {
        assert!(matches!(tokenize("1.5"), Err(LexerError::UnexpectedCharacter(_, '.'))));
    }
}
