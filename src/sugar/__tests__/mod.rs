use crate::language::Language;
use crate::sugar::{all, any_of, bracket, one_of, one_or_more, optional, sep, text, token};
use crate::{Parser, Tree};

#[test]
fn optional_leading() {
    let parser = Parser::new(Language::cat(optional(Language::ex('a')), Language::ex('b')))
        .unwrap();
    assert_eq!(
        parser.parses("ab".chars()),
        [Tree::pair(Tree::Leaf('a'), Tree::Leaf('b'))].into()
    );
    assert_eq!(
        parser.parses("b".chars()),
        [Tree::pair(Tree::Null, Tree::Leaf('b'))].into()
    );
}

#[test]
fn optional_trailing() {
    let parser = Parser::new(Language::cat(Language::ex('a'), optional(Language::ex('b'))))
        .unwrap();
    assert_eq!(
        parser.parses("ab".chars()),
        [Tree::pair(Tree::Leaf('a'), Tree::Leaf('b'))].into()
    );
    assert_eq!(
        parser.parses("a".chars()),
        [Tree::pair(Tree::Leaf('a'), Tree::Null)].into()
    );
}

#[test]
fn text_single_character() {
    let parser = Parser::new(text("a")).unwrap();
    assert_eq!(parser.parses("a".chars()), [Tree::text("a")].into());
    assert_eq!(parser.parses("b".chars()), [].into());
}

#[test]
fn text_whole_string() {
    let parser = Parser::new(text("abc")).unwrap();
    assert_eq!(parser.parses("abc".chars()), [Tree::text("abc")].into());
}

#[test]
fn text_fails_on_the_first_character() {
    let parser = Parser::new(text("abc")).unwrap();
    assert_eq!(parser.parses("dbc".chars()), [].into());
}

#[test]
fn text_fails_on_the_last_character() {
    let parser = Parser::new(text("abc")).unwrap();
    assert_eq!(parser.parses("abd".chars()), [].into());
}

#[test]
fn empty_text_is_the_empty_string() {
    let parser = Parser::new(text("")).unwrap();
    assert!(parser.matches("".chars()));
    assert!(!parser.matches("x".chars()));
}

#[test]
fn all_concatenates_in_order() {
    let parser = Parser::new(all(vec![
        Language::ex('x'),
        Language::ex('y'),
        Language::ex('z'),
    ]))
    .unwrap();
    assert!(parser.matches("xyz".chars()));
    assert!(!parser.matches("xzy".chars()));
}

#[test]
fn one_of_accepts_each_alternative() {
    let parser = Parser::new(one_of(vec![text("ab"), text("cd"), text("ef")])).unwrap();
    for accepted in ["ab", "cd", "ef"] {
        assert!(parser.matches(accepted.chars()));
    }
    assert!(!parser.matches("ba".chars()));
}

#[test]
fn any_of_is_a_character_set() {
    let parser = Parser::new(any_of("xyz")).unwrap();
    assert_eq!(parser.parses("y".chars()), [Tree::Leaf('y')].into());
    assert!(!parser.matches("w".chars()));
}

#[test]
fn one_or_more_requires_one() {
    let parser = Parser::new(one_or_more(Language::ex('a'))).unwrap();
    assert!(!parser.matches("".chars()));
    assert_eq!(
        parser.parses("a".chars()),
        [Tree::Tuple(vec![Tree::Leaf('a')])].into()
    );
    assert_eq!(
        parser.parses("aaa".chars()),
        [Tree::Tuple(vec![
            Tree::Leaf('a'),
            Tree::Leaf('a'),
            Tree::Leaf('a'),
        ])]
        .into()
    );
}

#[test]
fn sep_keeps_items_and_drops_separators() {
    let parser = Parser::new(sep(Language::ex('x'), Language::ex(','))).unwrap();
    assert_eq!(
        parser.parses("x".chars()),
        [Tree::Tuple(vec![Tree::Leaf('x')])].into()
    );
    assert_eq!(
        parser.parses("x,x,x".chars()),
        [Tree::tuple(vec![
            Tree::Leaf('x'),
            Tree::Leaf('x'),
            Tree::Leaf('x'),
        ])]
        .into()
    );
    assert!(!parser.matches("x,".chars()));
    assert!(!parser.matches(",x".chars()));
}

#[test]
fn bracket_keeps_the_body() {
    let parser = Parser::new(bracket(
        Language::ex('('),
        Language::ex('x'),
        Language::ex(')'),
    ))
    .unwrap();
    assert_eq!(parser.parses("(x)".chars()), [Tree::Leaf('x')].into());
    assert!(!parser.matches("(x".chars()));
}

#[test]
fn token_relabels_the_match() {
    let parser = Parser::new(token(text("def"), "keyword-def")).unwrap();
    assert_eq!(
        parser.parses("def".chars()),
        [Tree::text("keyword-def")].into()
    );
}
