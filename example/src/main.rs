use content_values::{ColumnTypeAdapter, ContentValues};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Stores timestamps as milliseconds since the epoch
#[derive(Default)]
pub struct EpochMillis;

impl ColumnTypeAdapter<SystemTime> for EpochMillis {
    fn to_content_values(&self, values: &mut ContentValues, column_name: &str, value: &SystemTime) {
        let millis = value
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or_default();
        values.put(column_name, millis);
    }
}

#[derive(content_values::ContentValues)]
pub struct Person {
    #[column(name = "_id")]
    pub id: i64,
    pub name: String,
    pub nickname: Option<String>,
    pub age: Option<i32>,
    pub avatar: Vec<u8>,
    #[column(adapter = EpochMillis)]
    pub created_at: SystemTime,
    #[column(adapter = EpochMillis)]
    pub updated_at: SystemTime,
}

#[derive(content_values::ContentValues)]
#[content_values(
    /// Values for an insert into the `tags` table
    pub fn insert_values(&self) -> ContentValues;
)]
pub struct Tag<'a> {
    pub label: &'a str,
    pub weight: f64,
}

fn main() {
    let created = UNIX_EPOCH + Duration::from_secs(1_700_000_000);

    let person = Person {
        id: 1,
        name: "Ada Lovelace".to_string(),
        nickname: None,
        age: Some(36),
        avatar: vec![0x89, 0x50, 0x4e, 0x47],
        created_at: created,
        updated_at: created + Duration::from_secs(60),
    };

    let tag = Tag {
        label: "math",
        weight: 0.75,
    };

    let values = person.to_content_values();
    println!("{values}");
    println!("{:#?}", values);

    let tag_values = tag.insert_values();
    println!("{tag_values}");

    match values.get_as::<Option<String>>("nickname") {
        Ok(nickname) => println!("nickname: {nickname:?}"),
        Err(err) => println!("nickname: {err}"),
    }
}
