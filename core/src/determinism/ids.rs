use ulid::Ulid;

pub fn event_id_ulid() -> String {
    format!("evt_{}", Ulid::new().to_string())
}
