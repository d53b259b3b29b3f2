//! Remote user to local models.
//!
//! `email` is the natural key and is always copied. Every other attribute goes through
//! `Field::from_option`, so an attribute the API leaves out ends up `Null`, never `Unknown`.

use crate::model::timestamp;
use crate::model::wire::User;
use crate::model::{UserDataSourceModel, UserItem, UserResourceModel};
use reconcile_framework::Field;

pub fn to_item(user: &User) -> UserItem {
    UserItem {
        id: Field::from_option(user.id.clone()),
        email: Field::Known(user.email.clone()),
        first_name: Field::from_option(user.first_name.clone()),
        last_name: Field::from_option(user.last_name.clone()),
        role: Field::from_option(user.role.clone()),
        is_pending: Field::from_option(user.is_pending),
        created_at: timestamp(user.created_at.as_ref()),
        updated_at: timestamp(user.updated_at.as_ref()),
    }
}

/// Refreshes a managed user. `addressed_id` is kept when the payload has no id.
pub fn apply_to_resource(addressed_id: &str, user: &User, model: &mut UserResourceModel) {
    let item = to_item(user);
    model.id = match item.id {
        Field::Known(id) => Field::Known(id),
        _ => Field::Known(addressed_id.to_string()),
    };
    model.email = item.email;
    model.first_name = item.first_name;
    model.last_name = item.last_name;
    model.role = item.role;
    model.is_pending = item.is_pending;
    model.created_at = item.created_at;
    model.updated_at = item.updated_at;
}

/// Fills a looked-up user. A known `id` in the config survives a payload without one.
pub fn apply_to_data_source(user: &User, model: &mut UserDataSourceModel) {
    let item = to_item(user);
    model.id = match (item.id, &model.id) {
        (Field::Known(id), _) => Field::Known(id),
        (_, Field::Known(id)) => Field::Known(id.clone()),
        _ => Field::Null,
    };
    model.email = item.email;
    model.first_name = item.first_name;
    model.last_name = item.last_name;
    model.role = item.role;
    model.is_pending = item.is_pending;
    model.created_at = item.created_at;
    model.updated_at = item.updated_at;
}
