//! `#[derive(Record)]` end to end: column resolution, statement building and row mapping.

#![cfg(feature = "derive")]
#![allow(dead_code)]

use pgmap::{
    Context, MapConfig, MapError, Mapper, MemoryCursor, Record, RecordType, Statement, Value,
    descriptors,
};

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Audit {
    pub created_by: String,
    #[sql("note/insert")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Account {
    #[sql("id/insert/update")]
    pub id: i64,
    pub name: String,
    #[sql("email")]
    pub email: Option<String>,
    secret: String,
    #[sql("-")]
    pub scratch: String,
    #[sql(embed)]
    pub audit: Audit,
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Team {
    pub name: String,
    #[sql("member")]
    pub members: Vec<String>,
    pub avatar: Vec<u8>,
}

type Byte = u8;

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Blob {
    pub id: i32,
    // the alias hides that this is bytea
    #[sql("raw", scalar)]
    pub data: Vec<Byte>,
}

#[derive(Debug, Clone, Default, PartialEq, Record)]
pub struct Hidden {
    #[sql("-")]
    pub note: String,
    private: i32,
}

fn names(mapper: &Mapper, context: Context) -> Vec<String> {
    mapper
        .columns::<Account>(context)
        .unwrap()
        .names()
        .map(str::to_string)
        .collect()
}

#[test]
fn derived_columns_per_context() {
    let mapper = Mapper::new();
    assert_eq!(names(&mapper, Context::Insert), ["name", "email", "created_by"]);
    assert_eq!(
        names(&mapper, Context::Update),
        ["name", "email", "created_by", "note"]
    );
    assert_eq!(
        names(&mapper, Context::Select),
        ["id", "name", "email", "created_by", "note"]
    );

    let strict = Mapper::with_config(MapConfig::new().strict());
    assert_eq!(names(&strict, Context::Select), ["id", "email", "note"]);
}

#[test]
fn skipped_and_private_fields_produce_no_column() {
    let all = descriptors(&RecordType::of::<Hidden>(), pgmap::Naming::Lenient).unwrap();
    assert!(all.is_empty());

    let err = Mapper::new()
        .build_insert("hidden", &[Hidden::default()])
        .unwrap_err();
    assert!(matches!(err, MapError::NoColumns { .. }));
}

#[test]
fn vec_fields_are_repeated_except_bytes() {
    let select = Mapper::new().columns::<Team>(Context::Select).unwrap();
    let flags: Vec<_> = select.iter().map(|d| (d.name.as_str(), d.repeated)).collect();
    assert_eq!(flags, [("name", false), ("member", true), ("avatar", false)]);

    let select = Mapper::new().columns::<Blob>(Context::Select).unwrap();
    let flags: Vec<_> = select.iter().map(|d| (d.name.as_str(), d.repeated)).collect();
    assert_eq!(flags, [("id", false), ("raw", false)]);
}

#[test]
fn insert_from_derived_records() {
    let accounts = [
        Account {
            id: 1,
            name: "alice".into(),
            email: Some("a@example.com".into()),
            audit: Audit {
                created_by: "root".into(),
                note: None,
            },
            ..Default::default()
        },
        Account {
            id: 2,
            name: "bob".into(),
            ..Default::default()
        },
    ];
    let stmt = Mapper::new().build_insert("accounts", &accounts).unwrap();
    assert_eq!(
        stmt.sql(),
        "insert into accounts(name, email, created_by) values ($1, $2, $3), ($4, $5, $6)"
    );
    assert_eq!(stmt.args().len(), 6);
    assert_eq!(stmt.args()[4], Value::Null);
}

#[test]
fn update_from_derived_record() {
    let account = Account {
        name: "alice".into(),
        audit: Audit {
            created_by: String::new(),
            note: Some("moved".into()),
        },
        ..Default::default()
    };
    let stmt = Mapper::new()
        .build_update("accounts", &account, Statement::new("id = $1").bind(1_i64))
        .unwrap();
    assert_eq!(
        stmt.sql(),
        "update accounts set name = $1, note = $2 where id = $3"
    );
    assert_eq!(
        stmt.args(),
        [
            Value::Text("alice".into()),
            Value::Text("moved".into()),
            Value::Int(1),
        ]
    );
}

#[test]
fn aggregates_joined_rows() {
    let rows = MemoryCursor::new(["name", "member", "avatar"])
        .row(vec![
            Value::Text("core".into()),
            Value::Text("alice".into()),
            Value::Bytes(vec![1]),
        ])
        .row(vec![
            Value::Text("core".into()),
            Value::Text("bob".into()),
            Value::Bytes(vec![1]),
        ])
        .row(vec![
            Value::Text("infra".into()),
            Value::Null,
            Value::Bytes(vec![]),
        ]);

    let mut teams: Vec<Team> = Vec::new();
    Mapper::new().scan_all(rows, &mut teams).unwrap();
    assert_eq!(
        teams,
        [
            Team {
                name: "core".into(),
                members: vec!["alice".into(), "bob".into()],
                avatar: vec![1],
            },
            Team {
                name: "infra".into(),
                members: vec![],
                avatar: vec![],
            },
        ]
    );
}

#[test]
fn scans_into_embedded_fields() {
    let rows = MemoryCursor::new(["ID", "Name", "created_by"]).row(vec![
        Value::Int(5),
        Value::Text("carol".into()),
        Value::Text("admin".into()),
    ]);
    let mut account = Account::default();
    Mapper::new().scan_one(rows, &mut account).unwrap();
    assert_eq!(account.id, 5);
    assert_eq!(account.name, "carol");
    assert_eq!(account.audit.created_by, "admin");
    assert_eq!(account.email, None);
}

#[test]
fn dynamic_insert_checks_types() {
    let account = Account::default();
    let team = Team::default();
    let records: [&dyn pgmap::AnyRecord; 2] = [&account, &team];
    let err = Mapper::new()
        .build_insert_dyn("accounts", &records)
        .unwrap_err();
    assert!(matches!(err, MapError::TypeMismatch { .. }));
}

#[test]
fn field_table_matches_declaration() {
    let fields = <Account as Record>::fields();
    let idents: Vec<_> = fields.iter().map(|f| f.ident).collect();
    assert_eq!(
        idents,
        ["id", "name", "email", "secret", "scratch", "audit"]
    );
    assert!(!fields[3].public);
    assert_eq!(fields[4].tag, Some("-"));
}
