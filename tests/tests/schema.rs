use ferry::{
    driver::{operation::CreateTable, Operation},
    schema::db::{self, ColumnDef},
    Entity, Field, Instance, Registry, SerDes,
};
use std::rc::Rc;
use std_util::prelude::*;
use tests::{
    models::{self, Author, Book, Employee, User},
    Test,
};

fn library() -> Test {
    let registry = Registry::new();
    assert_ok!(models::register_library(&registry));
    Test::new(registry)
}

fn column(name: &str, ty: db::Type, unique: bool, nullable: bool) -> ColumnDef {
    ColumnDef {
        name: name.to_string(),
        ty,
        unique,
        nullable,
    }
}

#[test]
fn create_user_table() {
    let registry = Registry::new();
    assert_ok!(models::register_user(&registry));

    let mut test = Test::new(registry);
    assert!(!assert_ok!(test.db().table_exists::<User>()));
    test.log().clear();

    assert_ok!(test.db().create_table::<User>());
    assert_eq!(
        test.log().pop_op(),
        Some(Operation::CreateTable(CreateTable {
            table: "users".to_string(),
            primary_key: "username".to_string(),
            columns: vec![
                column("username", db::Type::VarChar(255), true, false),
                column("first_name", db::Type::Text, false, false),
                column("surname", db::Type::Text, false, false),
                column("age", db::Type::Integer(4), false, true),
            ],
        }))
    );

    assert!(assert_ok!(test.db().table_exists::<User>()));
}

#[test]
fn linked_tables_are_created_once_from_either_side() {
    for from_book in [true, false] {
        let mut test = library();

        if from_book {
            assert_ok!(test.db().create_table::<Book>());
        } else {
            assert_ok!(test.db().create_table::<Author>());
        }

        let mut created = test.log().tables(Operation::is_create_table);
        created.sort();
        assert_eq!(created, ["authors", "books"]);

        let mut constrained = test.log().tables(Operation::is_add_foreign_key);
        constrained.sort();
        assert_eq!(constrained, ["authors", "books"]);

        assert!(assert_ok!(test.db().table_exists::<Author>()));
        assert!(assert_ok!(test.db().table_exists::<Book>()));
        assert!(!test.serdes::<Author>().is_creating_table());
        assert!(!test.serdes::<Book>().is_creating_table());
    }
}

#[test]
fn self_referencing_table() {
    let registry = Registry::new();
    assert_ok!(models::register_employee(&registry));

    let mut test = Test::new(registry);
    assert_ok!(test.db().create_table::<Employee>());

    assert_eq!(test.log().tables(Operation::is_create_table), ["employees"]);
    assert_eq!(
        test.log().tables(Operation::is_add_foreign_key),
        ["employees"]
    );
}

#[test]
fn linked_entity_must_be_registered() {
    let registry = Registry::new();
    assert_ok!(models::register_book(&registry));

    let mut test = Test::new(registry);
    let err = assert_err!(test.db().create_table::<Book>());
    assert!(err.is_no_mapping_registered());
    assert!(!test.serdes::<Book>().is_creating_table());
}

#[test]
fn storage_type_override() {
    #[derive(Debug)]
    struct Setting {
        key: String,
        value: String,
    }

    impl Entity for Setting {}

    let registry = Registry::new();
    assert_ok!(SerDes::builder()
        .table("app_settings")
        .primary(
            Field::primary("key", |s: &Setting| s.key.clone()).storage_ty(db::Type::VarChar(64)),
        )
        .field(
            Field::immutable("value", |s: &Setting| s.value.clone())
                .storage_ty(db::Type::Custom("CLOB".to_string())),
        )
        .constructor(|args| {
            Ok(Setting {
                key: args.next()?,
                value: args.next()?,
            })
        })
        .build(&registry));

    let mut test = Test::new(registry);
    assert_ok!(test.db().create_table::<Setting>());

    let Some(Operation::CreateTable(create)) = test.log().pop_op() else {
        panic!("expected a create table operation");
    };
    assert_eq!(create.table, "app_settings");
    assert_eq!(
        create.columns,
        [
            column("key", db::Type::VarChar(64), true, false),
            column("value", db::Type::Custom("CLOB".to_string()), false, false),
        ]
    );

    assert_ok!(test.db().save(&Setting {
        key: "theme".to_string(),
        value: "dark".to_string(),
    }));
    let found = assert_ok!(test.db().find::<Setting>("theme"));
    assert_eq!(found.borrow().value, "dark");
}

#[derive(Debug)]
struct Person {
    id: i64,
}

impl Entity for Person {}

fn person_id() -> Rc<Field<Person>> {
    Rc::new(Field::primary("id", |p: &Person| p.id))
}

fn register_person(registry: &Registry) {
    assert_ok!(SerDes::builder()
        .primary(person_id())
        .constructor(|args| Ok(Person { id: args.next()? }))
        .build(registry));
}

#[test]
fn two_links_to_one_table_create_it_once() {
    struct Doc {
        id: i64,
        owner: Option<Instance<Person>>,
        editor: Option<Instance<Person>>,
    }

    impl Entity for Doc {}

    let registry = Registry::new();
    register_person(&registry);
    assert_ok!(SerDes::builder()
        .primary(Field::primary("id", |d: &Doc| d.id))
        .field(Field::foreign("owner_id", person_id(), |d: &Doc| {
            d.owner.clone()
        }))
        .field(Field::foreign("editor_id", person_id(), |d: &Doc| {
            d.editor.clone()
        }))
        .constructor(|args| {
            Ok(Doc {
                id: args.next()?,
                owner: args.next_entity()?,
                editor: args.next_entity()?,
            })
        })
        .build(&registry));

    let mut test = Test::new(registry);
    assert_ok!(test.db().create_table::<Doc>());

    assert_eq!(
        test.log().tables(Operation::is_create_table),
        ["docs", "people"]
    );
    assert_eq!(
        test.log().tables(Operation::is_add_foreign_key),
        ["docs", "docs"]
    );

    // A later call starts from scratch and hits the existing table.
    assert!(assert_err!(test.db().create_table::<Person>()).is_driver());
}

#[test]
fn diamond_of_links_creates_each_table_once() {
    struct Team {
        id: i64,
        lead: Option<Instance<Person>>,
    }

    impl Entity for Team {}

    struct Office {
        id: i64,
        manager: Option<Instance<Person>>,
    }

    impl Entity for Office {}

    struct Project {
        id: i64,
        team: Option<Instance<Team>>,
        office: Option<Instance<Office>>,
    }

    impl Entity for Project {}

    let team_id = Rc::new(Field::primary("id", |t: &Team| t.id));
    let office_id = Rc::new(Field::primary("id", |o: &Office| o.id));

    let registry = Registry::new();
    register_person(&registry);
    assert_ok!(SerDes::builder()
        .primary(team_id.clone())
        .field(Field::foreign("lead_id", person_id(), |t: &Team| t.lead.clone()))
        .constructor(|args| {
            Ok(Team {
                id: args.next()?,
                lead: args.next_entity()?,
            })
        })
        .build(&registry));
    assert_ok!(SerDes::builder()
        .primary(office_id.clone())
        .field(Field::foreign("manager_id", person_id(), |o: &Office| {
            o.manager.clone()
        }))
        .constructor(|args| {
            Ok(Office {
                id: args.next()?,
                manager: args.next_entity()?,
            })
        })
        .build(&registry));
    assert_ok!(SerDes::builder()
        .primary(Field::primary("id", |p: &Project| p.id))
        .field(Field::foreign("team_id", team_id, |p: &Project| p.team.clone()))
        .field(Field::foreign("office_id", office_id, |p: &Project| {
            p.office.clone()
        }))
        .constructor(|args| {
            Ok(Project {
                id: args.next()?,
                team: args.next_entity()?,
                office: args.next_entity()?,
            })
        })
        .build(&registry));

    let mut test = Test::new(registry);
    assert_ok!(test.db().create_table::<Project>());

    assert_eq!(
        test.log().tables(Operation::is_create_table),
        ["projects", "teams", "people", "offices"]
    );
    assert_eq!(
        test.log().tables(Operation::is_add_foreign_key),
        ["teams", "projects", "offices", "projects"]
    );
}
