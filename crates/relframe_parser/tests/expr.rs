use insta::assert_debug_snapshot;
use relframe_parser::parse_expr;

#[test]
fn parse_years_since_graduation() {
    assert_debug_snapshot!(parse_expr("2023 - int(GradYear)").unwrap(), @r###"
    BinaryExpr {
        left: Literal(
            Number(
                "2023",
            ),
        ),
        op: Minus,
        right: Function {
            name: Ident {
                value: "int",
            },
            args: [
                Ident(
                    Ident {
                        value: "GradYear",
                    },
                ),
            ],
        },
    }
    "###);
}

#[test]
fn parse_string_concat() {
    assert_debug_snapshot!(parse_expr("SName + '!'").unwrap(), @r###"
    BinaryExpr {
        left: Ident(
            Ident {
                value: "SName",
            },
        ),
        op: Plus,
        right: Literal(
            String(
                "!",
            ),
        ),
    }
    "###);
}

#[test]
fn trailing_tokens_rejected() {
    assert!(parse_expr("1 2").is_err());
    assert!(parse_expr("a b").is_err());
    assert!(parse_expr("(1))").is_err());
}
