//! Entities shared by the integration tests.

use ferry::{Entity, Field, Instance, Registry, Result, SerDes};
use std::{cell::RefCell, fmt, rc::Rc};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub username: String,
    pub first_name: String,
    pub surname: String,
    pub age: Option<i32>,
}

impl Entity for User {}

impl User {
    pub fn new(username: &str, first_name: &str, surname: &str) -> User {
        User {
            username: username.to_string(),
            first_name: first_name.to_string(),
            surname: surname.to_string(),
            age: None,
        }
    }
}

pub fn register_user(registry: &Registry) -> Result<Rc<SerDes<User>>> {
    SerDes::builder()
        .primary(Field::primary("username", |u: &User| u.username.clone()))
        .field(Field::immutable("first_name", |u: &User| u.first_name.clone()))
        .field(Field::mutable(
            "surname",
            |u: &User| u.surname.clone(),
            |u, v| u.surname = v,
        ))
        .field(Field::mutable("age", |u: &User| u.age, |u, v| u.age = v))
        .constructor(|args| {
            Ok(User {
                username: args.next()?,
                first_name: args.next()?,
                surname: String::new(),
                age: None,
            })
        })
        .build(registry)
}

/// Writes the key of a linked entity instead of the entity itself, so
/// cyclic graphs can be printed.
fn linked_key<T>(linked: &Option<Instance<T>>, key: impl Fn(&T) -> String) -> String {
    match linked {
        Some(linked) => match linked.try_borrow() {
            Ok(linked) => key(&linked),
            Err(_) => "<borrowed>".to_string(),
        },
        None => "None".to_string(),
    }
}

/// Links to its favorite book after construction.
pub struct Author {
    pub id: i64,
    pub name: String,
    pub favorite: Option<Instance<Book>>,
}

impl Entity for Author {}

impl fmt::Debug for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Author")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("favorite", &linked_key(&self.favorite, |b| b.isbn.clone()))
            .finish()
    }
}

/// Receives its author at construction.
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: Option<Instance<Author>>,
}

impl Entity for Book {}

impl fmt::Debug for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Book")
            .field("isbn", &self.isbn)
            .field("title", &self.title)
            .field("author", &linked_key(&self.author, |a| a.id.to_string()))
            .finish()
    }
}

pub fn author_id() -> Rc<Field<Author>> {
    Rc::new(Field::primary("id", |a: &Author| a.id))
}

pub fn isbn() -> Rc<Field<Book>> {
    Rc::new(Field::primary("isbn", |b: &Book| b.isbn.clone()))
}

pub fn register_author(registry: &Registry) -> Result<Rc<SerDes<Author>>> {
    SerDes::builder()
        .primary(author_id())
        .field(Field::immutable("name", |a: &Author| a.name.clone()))
        .field(Field::mutable_foreign(
            "favorite_isbn",
            isbn(),
            |a: &Author| a.favorite.clone(),
            |a, v| a.favorite = v,
        ))
        .constructor(|args| {
            Ok(Author {
                id: args.next()?,
                name: args.next()?,
                favorite: None,
            })
        })
        .build(registry)
}

pub fn register_book(registry: &Registry) -> Result<Rc<SerDes<Book>>> {
    SerDes::builder()
        .primary(isbn())
        .field(Field::immutable("title", |b: &Book| b.title.clone()))
        .field(Field::foreign("author_id", author_id(), |b: &Book| {
            b.author.clone()
        }))
        .constructor(|args| {
            Ok(Book {
                isbn: args.next()?,
                title: args.next()?,
                author: args.next_entity()?,
            })
        })
        .build(registry)
}

pub fn register_library(registry: &Registry) -> Result<()> {
    register_author(registry)?;
    register_book(registry)?;
    Ok(())
}

pub fn author(id: i64, name: &str) -> Instance<Author> {
    Rc::new(RefCell::new(Author {
        id,
        name: name.to_string(),
        favorite: None,
    }))
}

pub fn book(isbn: &str, title: &str, author: &Instance<Author>) -> Instance<Book> {
    Rc::new(RefCell::new(Book {
        isbn: isbn.to_string(),
        title: title.to_string(),
        author: Some(author.clone()),
    }))
}

/// References another employee of the same table.
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub manager: Option<Instance<Employee>>,
}

impl Entity for Employee {}

impl fmt::Debug for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Employee")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("manager", &linked_key(&self.manager, |e| e.id.to_string()))
            .finish()
    }
}

pub fn register_employee(registry: &Registry) -> Result<Rc<SerDes<Employee>>> {
    let id = Rc::new(Field::primary("id", |e: &Employee| e.id));

    SerDes::builder()
        .primary(id.clone())
        .field(Field::immutable("name", |e: &Employee| e.name.clone()))
        .field(Field::mutable_foreign(
            "manager_id",
            id,
            |e: &Employee| e.manager.clone(),
            |e, v| e.manager = v,
        ))
        .constructor(|args| {
            Ok(Employee {
                id: args.next()?,
                name: args.next()?,
                manager: None,
            })
        })
        .build(registry)
}

pub fn employee(id: i32, name: &str) -> Instance<Employee> {
    Rc::new(RefCell::new(Employee {
        id,
        name: name.to_string(),
        manager: None,
    }))
}

/// Needs a `Right` to be constructed.
pub struct Left {
    pub id: i64,
    pub right: Option<Instance<Right>>,
}

impl Entity for Left {}

impl fmt::Debug for Left {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Left")
            .field("id", &self.id)
            .field("right", &linked_key(&self.right, |r| r.id.to_string()))
            .finish()
    }
}

/// Needs a `Left` to be constructed.
pub struct Right {
    pub id: i64,
    pub left: Option<Instance<Left>>,
}

impl Entity for Right {}

impl fmt::Debug for Right {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Right")
            .field("id", &self.id)
            .field("left", &linked_key(&self.left, |l| l.id.to_string()))
            .finish()
    }
}

pub fn register_left_right(registry: &Registry) -> Result<()> {
    let left_id = Rc::new(Field::primary("id", |l: &Left| l.id));
    let right_id = Rc::new(Field::primary("id", |r: &Right| r.id));

    SerDes::builder()
        .primary(left_id.clone())
        .field(Field::foreign("right_id", right_id.clone(), |l: &Left| {
            l.right.clone()
        }))
        .constructor(|args| {
            Ok(Left {
                id: args.next()?,
                right: args.next_entity()?,
            })
        })
        .build(registry)?;

    SerDes::builder()
        .primary(right_id)
        .field(Field::foreign("left_id", left_id, |r: &Right| r.left.clone()))
        .constructor(|args| {
            Ok(Right {
                id: args.next()?,
                left: args.next_entity()?,
            })
        })
        .build(registry)?;

    Ok(())
}
