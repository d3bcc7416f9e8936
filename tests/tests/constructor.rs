use ferry::{Entity, Field, Registry, SerDes};
use std_util::prelude::*;
use tests::Test;

#[derive(Debug)]
struct Point {
    id: i64,
    label: String,
}

impl Entity for Point {}

fn setup(construct: fn(&mut ferry::serdes::Args) -> ferry::Result<Point>) -> Test {
    let registry = Registry::new();
    assert_ok!(SerDes::builder()
        .primary(Field::primary("id", |p: &Point| p.id))
        .field(Field::immutable("label", |p: &Point| p.label.clone()))
        .constructor(construct)
        .build(&registry));

    let mut test = Test::new(registry);
    assert_ok!(test.db().create_table::<Point>());
    assert_ok!(test.db().save(&Point {
        id: 1,
        label: "origin".to_string(),
    }));
    test
}

#[test]
fn constructor_receives_immutable_values() {
    let mut test = setup(|args| {
        assert_eq!(args.len(), 2);
        Ok(Point {
            id: args.next()?,
            label: args.next()?,
        })
    });

    let point = assert_ok!(test.db().find::<Point>(1_i64));
    assert_eq!(point.borrow().label, "origin");
}

#[test]
fn constructor_with_wrong_types() {
    let mut test = setup(|args| {
        Ok(Point {
            id: args.next()?,
            label: args.next::<i64>()?.to_string(),
        })
    });

    let err = assert_err!(test.db().find::<Point>(1_i64));
    assert!(err.is_no_such_constructor());
    assert!(!test.serdes::<Point>().is_deserializing());
    assert_eq!(test.serdes::<Point>().cached_len(), 0);
}

#[test]
fn constructor_with_too_few_parameters() {
    let mut test = setup(|args| {
        Ok(Point {
            id: args.next()?,
            label: String::new(),
        })
    });

    let err = assert_err!(test.db().find::<Point>(1_i64));
    assert!(err.is_no_such_constructor());
}

#[test]
fn constructor_errors_propagate() {
    let mut test = setup(|_| ferry::bail!("points are not loadable"));

    let err = assert_err!(test.db().find::<Point>(1_i64));
    assert_eq!(err.to_string(), "points are not loadable");
}
