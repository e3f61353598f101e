use crate::language::Language;
use crate::{Lang, Memo, Tree};
use std::rc::Rc;

fn drive(memo: &mut Memo<char>, l: &Lang<char>, input: &str) -> Lang<char> {
    let mut current = l.clone();
    for c in input.chars() {
        let d = memo.derivative(&current, c);
        current = memo.compact(&d);
    }
    current
}

#[test]
fn cat_with_empty_collapses() {
    let mut memo = Memo::new();
    let left = Language::cat(Language::empty(), Language::ex('a'));
    let right = Language::cat(Language::ex('a'), Language::empty());
    assert!(matches!(&*memo.compact(&left), Language::Empty));
    assert!(matches!(&*memo.compact(&right), Language::Empty));
}

#[test]
fn alt_drops_the_empty_branch() {
    let mut memo = Memo::new();
    let keep = Language::ex('a');
    let l = Language::alt(Language::empty(), keep.clone());
    let k = memo.compact(&l);
    assert!(Rc::ptr_eq(&k, &keep));
    let l = Language::alt(keep.clone(), Language::empty());
    let k = memo.compact(&l);
    assert!(Rc::ptr_eq(&k, &keep));
}

#[test]
fn rep_of_empty_is_null() {
    let mut memo = Memo::new();
    let l: Lang<char> = Language::rep(Language::empty());
    let k = memo.compact(&l);
    assert!(matches!(&*k, Language::Null));
    // The unit tree survives the rewrite.
    assert_eq!(memo.trees(&k), [Tree::Null].into());
}

#[test]
fn red_over_matched_input_applies_eagerly() {
    let mut memo = Memo::new();
    let l = Language::red(
        Language::term([Tree::Leaf('a')].into()),
        Rc::new(|_: &Tree<char>| Tree::text("done")),
    );
    let k = memo.compact(&l);
    match &*k {
        Language::Term(ts) => assert_eq!(ts, &[Tree::text("done")].into()),
        other => panic!("expected Term, got {:?}", other),
    }
}

#[test]
fn red_over_null_applies_to_the_unit_tree() {
    let mut memo = Memo::new();
    let l = Language::red(
        Language::null(),
        Rc::new(|t: &Tree<char>| Tree::pair(t.clone(), Tree::text("tag"))),
    );
    let k = memo.compact(&l);
    match &*k {
        Language::Term(ts) => {
            assert_eq!(ts, &[Tree::pair(Tree::Null, Tree::text("tag"))].into());
        }
        other => panic!("expected Term, got {:?}", other),
    }
}

#[test]
fn stacked_reductions_compose_inner_first() {
    let mut memo = Memo::new();
    let inner = Language::red(
        Language::cat(Language::ex('a'), Language::ex('b')),
        Rc::new(|_: &Tree<char>| Tree::text("inner")),
    );
    let outer = Language::red(
        inner,
        Rc::new(|t: &Tree<char>| match t {
            Tree::Text(s) if &**s == "inner" => Tree::text("inner-then-outer"),
            _ => Tree::text("wrong-order"),
        }),
    );
    let k = memo.compact(&outer);
    assert!(matches!(&*k, Language::Red(_, _)));
    let rest = drive(&mut memo, &k, "ab");
    assert_eq!(memo.trees(&rest), [Tree::text("inner-then-outer")].into());
}

#[test]
fn compaction_preserves_the_denotation() {
    let mut noisy_memo = Memo::new();
    let noisy = Language::alt(
        Language::empty(),
        Language::cat(Language::ex('a'), Language::ex('b')),
    );
    let compacted = noisy_memo.compact(&noisy);

    let mut memo_a = Memo::new();
    let rest_a = drive(&mut memo_a, &noisy, "ab");
    let mut memo_b = Memo::new();
    let rest_b = drive(&mut memo_b, &compacted, "ab");
    assert_eq!(memo_a.trees(&rest_a), memo_b.trees(&rest_b));

    // Idempotent in meaning: compacting twice changes nothing further.
    let recompacted = noisy_memo.compact(&compacted);
    let mut memo_c = Memo::new();
    let rest_c = drive(&mut memo_c, &recompacted, "ab");
    assert_eq!(memo_b.trees(&rest_b), memo_c.trees(&rest_c));
}

#[test]
fn cat_with_one_carried_tree_curries_the_pair() {
    let mut memo = Memo::new();
    let l = Language::cat(
        Language::term([Tree::Leaf('t')].into()),
        Language::ex('x'),
    );
    let k = memo.compact(&l);
    assert!(matches!(&*k, Language::Red(_, _)));
    let rest = drive(&mut memo, &k, "x");
    assert_eq!(
        memo.trees(&rest),
        [Tree::pair(Tree::Leaf('t'), Tree::Leaf('x'))].into()
    );
}

#[test]
fn cat_with_several_carried_trees_keeps_them_all() {
    let mut memo = Memo::new();
    let l = Language::cat(
        Language::term([Tree::Leaf('s'), Tree::Leaf('t')].into()),
        Language::ex('x'),
    );
    let k = memo.compact(&l);
    let rest = drive(&mut memo, &k, "x");
    assert_eq!(
        memo.trees(&rest),
        [
            Tree::pair(Tree::Leaf('s'), Tree::Leaf('x')),
            Tree::pair(Tree::Leaf('t'), Tree::Leaf('x')),
        ]
        .into()
    );
}

#[test]
fn carried_tree_on_the_right_mirrors() {
    let mut memo = Memo::new();
    let l = Language::cat(
        Language::ex('x'),
        Language::term([Tree::Leaf('t')].into()),
    );
    let k = memo.compact(&l);
    let rest = drive(&mut memo, &k, "x");
    assert_eq!(
        memo.trees(&rest),
        [Tree::pair(Tree::Leaf('x'), Tree::Leaf('t'))].into()
    );
}

#[test]
fn compaction_is_memoized_per_session() {
    let mut memo = Memo::new();
    let l = Language::cat(Language::ex('a'), Language::ex('b'));
    let first = memo.compact(&l);
    let second = memo.compact(&l);
    assert!(Rc::ptr_eq(&first, &second));
}
