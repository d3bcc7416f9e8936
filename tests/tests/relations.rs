use ferry::{stmt::Value, Config, Entity, Field, Instance, Registry, SerDes};
use std::rc::Rc;
use std_util::prelude::*;
use tests::{
    models::{self, Author, Book, Employee, Left, Right},
    Test,
};

fn library() -> Test {
    library_in(Test::new)
}

fn library_in(open: fn(Registry) -> Test) -> Test {
    let registry = Registry::new();
    assert_ok!(models::register_library(&registry));

    let mut test = open(registry);
    assert_ok!(test.db().create_table::<Book>());

    let author = models::author(1, "Ursula");
    assert_ok!(test.db().save(&*author.borrow()));

    let book = models::book("b1", "Earthsea", &author);
    assert_ok!(test.db().save(&*book.borrow()));

    author.borrow_mut().favorite = Some(book.clone());
    assert_ok!(test.db().save(&*author.borrow()));

    test.log().clear();
    test
}

fn favorite(author: &Instance<Author>) -> Instance<Book> {
    assert_some!(author.borrow().favorite.clone())
}

fn author_of(book: &Instance<Book>) -> Instance<Author> {
    assert_some!(book.borrow().author.clone())
}

#[test]
fn mutable_link_is_saved_by_key() {
    let mut test = library();

    let author = assert_ok!(test.db().find::<Author>(1_i64));
    let book = favorite(&author);
    assert_eq!(book.borrow().isbn, "b1");
    assert_eq!(book.borrow().title, "Earthsea");

    let authors = test.serdes::<Author>();
    let field = assert_some!(authors.field("favorite_isbn"));
    assert_eq!(field.get(&author.borrow()), Value::from("b1"));
    assert_eq!(field.referenced_name(), Some("isbn"));
    assert_eq!(field.referenced_entity_name(), Some("Book"));
}

#[test]
fn mutual_references_load_from_the_author() {
    let mut test = library();

    let author = assert_ok!(test.db().find::<Author>(1_i64));
    let book = favorite(&author);

    assert!(Rc::ptr_eq(&author, &author_of(&book)));
    assert!(Rc::ptr_eq(&book, &assert_ok!(test.db().find::<Book>("b1"))));
}

#[test]
fn mutual_references_load_from_the_book() {
    let mut test = library();

    let book = assert_ok!(test.db().find::<Book>("b1"));
    let author = author_of(&book);

    assert!(Rc::ptr_eq(&book, &favorite(&author)));
    assert!(Rc::ptr_eq(&author, &assert_ok!(test.db().find::<Author>(1_i64))));

    assert!(!test.serdes::<Book>().is_deserializing());
    assert!(!test.serdes::<Author>().is_deserializing());
}

#[test]
fn referenced_entity_accessor() {
    let mut test = library();

    let book = assert_ok!(test.db().find::<Book>("b1"));
    let books = test.serdes::<Book>();
    let field = assert_some!(books.field("author_id"));
    assert!(!field.is_mutable());

    let author = assert_some!(field.referenced_entity::<Author>(&book.borrow()));
    assert_eq!(author.borrow().name, "Ursula");

    // Resolving a key goes through the author's cache
    let resolved = assert_ok!(field.resolve::<Author>(test.db(), &Value::I64(1)));
    assert!(Rc::ptr_eq(&author, &resolved));
}

#[test]
fn missing_linked_row() {
    let mut test = library_in(Test::without_foreign_keys);

    let driver = test.db().driver();
    assert_ok!(driver.insert(
        "books",
        vec![
            ("isbn".to_string(), Value::from("b2")),
            ("title".to_string(), Value::from("Orphan")),
            ("author_id".to_string(), Value::I64(99)),
        ],
    ));

    let err = assert_err!(test.db().find::<Book>("b2"));
    assert!(err.is_no_such_row());
    assert!(!test.serdes::<Book>().is_deserializing());
}

#[test]
fn cleared_link_loads_as_none() {
    let mut test = library();

    let author = assert_ok!(test.db().find::<Author>(1_i64));
    let driver = test.db().driver();
    assert_ok!(driver.insert(
        "authors",
        vec![
            ("id".to_string(), Value::I64(2)),
            ("name".to_string(), Value::from("Anon")),
        ],
    ));

    let anon = assert_ok!(test.db().find::<Author>(2_i64));
    assert!(anon.borrow().favorite.is_none());
    assert!(!Rc::ptr_eq(&author, &anon));
}

#[test]
fn self_referencing_cycle() {
    let registry = Registry::new();
    assert_ok!(models::register_employee(&registry));

    let mut test = Test::new(registry);
    assert_ok!(test.db().create_table::<Employee>());

    let alice = models::employee(1, "Alice");
    let bob = models::employee(2, "Bob");
    assert_ok!(test.db().save(&*alice.borrow()));
    assert_ok!(test.db().save(&*bob.borrow()));

    alice.borrow_mut().manager = Some(bob.clone());
    bob.borrow_mut().manager = Some(alice.clone());
    assert_ok!(test.db().save(&*alice.borrow()));
    assert_ok!(test.db().save(&*bob.borrow()));

    // Break the cycle so the saved instances can be dropped
    alice.borrow_mut().manager = None;
    test.log().clear();

    let found = assert_ok!(test.db().find::<Employee>(1));
    let manager = assert_some!(found.borrow().manager.clone());
    assert_eq!(manager.borrow().name, "Bob");

    let managers_manager = assert_some!(manager.borrow().manager.clone());
    assert!(Rc::ptr_eq(&found, &managers_manager));
    assert_eq!(test.log().selects(), 2);
}

#[test]
fn immutable_cycle_is_rejected() {
    let registry = Registry::new();
    assert_ok!(models::register_left_right(&registry));

    let mut test = Test::without_foreign_keys(registry);
    assert_ok!(test.db().create_table::<Left>());

    let driver = test.db().driver();
    assert_ok!(driver.insert(
        "lefts",
        vec![
            ("id".to_string(), Value::I64(1)),
            ("right_id".to_string(), Value::I64(1)),
        ],
    ));
    assert_ok!(driver.insert(
        "rights",
        vec![
            ("id".to_string(), Value::I64(1)),
            ("left_id".to_string(), Value::I64(1)),
        ],
    ));

    let err = assert_err!(test.db().find::<Left>(1_i64));
    assert!(err.is_cyclic_reference());

    let lefts = test.serdes::<Left>();
    let rights = test.serdes::<Right>();
    assert!(!lefts.is_deserializing());
    assert!(!rights.is_deserializing());
    assert_eq!(lefts.cached_len(), 0);
}

#[test]
fn link_by_unique_field() {
    #[derive(Debug)]
    struct Account {
        id: i64,
        email: String,
    }

    impl Entity for Account {}

    struct Login {
        id: i64,
        account: Option<Instance<Account>>,
    }

    impl Entity for Login {}

    let email = Rc::new(Field::immutable("email", |a: &Account| a.email.clone()).unique());

    let registry = Registry::new();
    assert_ok!(SerDes::builder()
        .primary(Field::primary("id", |a: &Account| a.id))
        .field(email.clone())
        .constructor(|args| {
            Ok(Account {
                id: args.next()?,
                email: args.next()?,
            })
        })
        .build(&registry));

    assert_ok!(SerDes::builder()
        .primary(Field::primary("id", |l: &Login| l.id))
        .field(Field::foreign("account_email", email, |l: &Login| {
            l.account.clone()
        }))
        .constructor(|args| {
            Ok(Login {
                id: args.next()?,
                account: args.next_entity()?,
            })
        })
        .build(&registry));

    let mut test = Test::new(registry);
    assert_ok!(test.db().create_table::<Login>());

    let account = Rc::new(std::cell::RefCell::new(Account {
        id: 5,
        email: "ann@example.com".to_string(),
    }));
    assert_ok!(test.db().save(&*account.borrow()));
    assert_ok!(test.db().save(&Login {
        id: 1,
        account: Some(account.clone()),
    }));
    assert_ok!(test.db().save(&Login {
        id: 2,
        account: Some(account.clone()),
    }));
    test.log().clear();

    let first = assert_ok!(test.db().find::<Login>(1_i64));
    let second = assert_ok!(test.db().find::<Login>(2_i64));

    let first = assert_some!(first.borrow().account.clone());
    let second = assert_some!(second.borrow().account.clone());
    assert_eq!(first.borrow().id, 5);
    assert!(Rc::ptr_eq(&first, &second));

    // The second login found its account in the cache
    assert_eq!(test.log().selects(), 3);
}

#[test]
fn cycle_loads_within_a_full_cache() {
    let registry = Registry::with_config(Config::new().cache_capacity(1));
    let employees = assert_ok!(models::register_employee(&registry));

    let mut test = Test::new(registry);
    assert_ok!(test.db().create_table::<Employee>());

    let alice = models::employee(1, "Alice");
    let bob = models::employee(2, "Bob");
    assert_ok!(test.db().save(&*alice.borrow()));
    assert_ok!(test.db().save(&*bob.borrow()));

    alice.borrow_mut().manager = Some(bob.clone());
    bob.borrow_mut().manager = Some(alice.clone());
    assert_ok!(test.db().save(&*alice.borrow()));
    assert_ok!(test.db().save(&*bob.borrow()));
    alice.borrow_mut().manager = None;
    test.log().clear();

    let found = assert_ok!(test.db().find::<Employee>(1));
    let manager = assert_some!(found.borrow().manager.clone());
    let managers_manager = assert_some!(manager.borrow().manager.clone());
    assert!(Rc::ptr_eq(&found, &managers_manager));
    assert_eq!(test.log().selects(), 2);

    // Both were cached while loading; the cache is back within capacity
    // once the load is done.
    assert_eq!(employees.cached_len(), 1);
    assert!(!employees.is_deserializing());

    manager.borrow_mut().manager = None;
}

#[test]
fn failed_load_leaves_no_waiting_links() {
    #[derive(Debug)]
    struct Node {
        id: i64,
        prev: Option<Instance<Node>>,
        rank: i32,
    }

    impl Entity for Node {}

    let id = Rc::new(Field::primary("id", |n: &Node| n.id));

    let registry = Registry::new();
    let nodes = assert_ok!(SerDes::builder()
        .primary(id.clone())
        .field(Field::mutable_foreign(
            "prev_id",
            id,
            |n: &Node| n.prev.clone(),
            |n, v| n.prev = v,
        ))
        .field(Field::mutable("rank", |n: &Node| n.rank, |n, v| n.rank = v))
        .constructor(|args| {
            Ok(Node {
                id: args.next()?,
                prev: None,
                rank: 0,
            })
        })
        .build(&registry));

    let mut test = Test::without_foreign_keys(registry);
    assert_ok!(test.db().create_table::<Node>());

    let driver = test.db().driver();
    for (id, prev, rank) in [
        (1, Value::I64(2), Value::I32(1)),
        (2, Value::I64(1), Value::from("high")),
        (3, Value::Null, Value::I32(3)),
    ] {
        assert_ok!(driver.insert(
            "nodes",
            vec![
                ("id".to_string(), Value::I64(id)),
                ("prev_id".to_string(), prev),
                ("rank".to_string(), rank),
            ],
        ));
    }

    // Node 2 queues its link back to node 1, then fails on its rank.
    let err = assert_err!(test.db().find::<Node>(1_i64));
    assert!(err.is_type_conversion());
    assert_eq!(nodes.cached_len(), 0);
    assert!(!nodes.is_deserializing());
    test.log().clear();

    let third = assert_ok!(test.db().find::<Node>(3_i64));
    assert_eq!(third.borrow().rank, 3);
    assert!(third.borrow().prev.is_none());
    assert_eq!(test.log().selects(), 1);
}
