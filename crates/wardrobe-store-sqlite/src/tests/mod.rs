//! Integration tests for `SqliteStore` and the donation workflow against an
//! in-memory database.


use wardrobe_core::{
  account::{Account, NewAccount},
  item::{Audience, Category, ClothingItem, NewItem},
  store::WardrobeStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn account(s: &SqliteStore, name: &str, email: &str) -> Account {
  s.create_account(NewAccount {
    name:          name.into(),
    email:         email.into(),
    password_hash: "$argon2id$placeholder".into(),
  })
  .await
  .unwrap()
}

fn new_item(name: &str, category: Category, color: &str) -> NewItem {
  NewItem {
    name:      name.into(),
    category,
    audience:  Audience::Unisex,
    color:     color.into(),
    image_url: format!("/uploads/images/{name}.png"),
  }
}

async fn item(s: &SqliteStore, owner: &Account) -> ClothingItem {
  s.add_item(owner.account_id, new_item("Denim Jacket", Category::Jacket, "blue"))
    .await
    .unwrap()
}
