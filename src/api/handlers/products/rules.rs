//! Rule chains for the product routes.
//!
//! Order matters: errors are reported in the order the rules appear in each
//! route's slice.

use serde_json::Value;

use crate::{
    api::validation::{Input, Rule, ValidationErrors, checks, validate},
    store::ProductValues,
};

const ID_IS_INT: Rule = Rule::param("id", checks::is_int, "ID no válido");

const NAME_IS_STRING: Rule = Rule::body(
    "name",
    checks::is_string,
    "El nombre debe ser una cadena de texto",
);
const NAME_REQUIRED: Rule = Rule::body(
    "name",
    checks::not_empty,
    "El nombre del Producto es obligatorio",
);

const PRICE_IS_NUMERIC: Rule = Rule::body("price", checks::is_numeric, "Valor no válido");
const PRICE_REQUIRED: Rule = Rule::body(
    "price",
    checks::not_empty,
    "El precio del Producto es obligatorio",
);
const PRICE_IS_POSITIVE: Rule = Rule::body("price", checks::is_positive, "Precio inválido");

const AVAILABILITY_IS_BOOLEAN: Rule =
    Rule::body("availability", checks::is_boolean, "Valor no válido");

pub(super) const ID_RULES: &[Rule] = &[ID_IS_INT];

pub(super) const CREATE_RULES: &[Rule] = &[
    NAME_IS_STRING,
    NAME_REQUIRED,
    PRICE_IS_NUMERIC,
    PRICE_REQUIRED,
    PRICE_IS_POSITIVE,
];

pub(super) const UPDATE_RULES: &[Rule] = &[
    ID_IS_INT,
    NAME_IS_STRING,
    NAME_REQUIRED,
    PRICE_IS_NUMERIC,
    PRICE_REQUIRED,
    PRICE_IS_POSITIVE,
    AVAILABILITY_IS_BOOLEAN,
];

/// Validate a path id.
pub(super) fn product_id(raw_id: &str) -> Result<i64, ValidationErrors> {
    let input = Input::default().with_param("id", raw_id);
    validate(ID_RULES, &input)?;
    input.extract(&ID_IS_INT, checks::int)
}

/// Validate a create body. New products always start available.
pub(super) fn new_product(body: Value) -> Result<ProductValues, ValidationErrors> {
    let input = Input::from_body(body);
    validate(CREATE_RULES, &input)?;

    let name = input.extract(&NAME_IS_STRING, checks::string)?;
    let price = input.extract(&PRICE_IS_POSITIVE, checks::number)?;
    Ok(ProductValues::new(name, price))
}

/// Validate a full update: path id plus every writable field.
pub(super) fn product_update(
    raw_id: &str,
    body: Value,
) -> Result<(i64, ProductValues), ValidationErrors> {
    let input = Input::from_body(body).with_param("id", raw_id);
    validate(UPDATE_RULES, &input)?;

    let id = input.extract(&ID_IS_INT, checks::int)?;
    let values = ProductValues {
        name: input.extract(&NAME_IS_STRING, checks::string)?,
        price: input.extract(&PRICE_IS_POSITIVE, checks::number)?,
        availability: input.extract(&AVAILABILITY_IS_BOOLEAN, checks::flag)?,
    };
    Ok((id, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_messages(body: Value) -> Vec<String> {
        match new_product(body) {
            Ok(_) => Vec::new(),
            Err(errors) => errors.errors.into_iter().map(|e| e.msg).collect(),
        }
    }

    fn update_messages(id: &str, body: Value) -> Vec<String> {
        match product_update(id, body) {
            Ok(_) => Vec::new(),
            Err(errors) => errors.errors.into_iter().map(|e| e.msg).collect(),
        }
    }

    fn valid_update() -> Value {
        json!({"name": "Notebook - ACTUALIZADO", "price": 2500, "availability": true})
    }

    #[test]
    fn empty_create_body_fails_every_rule() {
        assert_eq!(
            create_messages(json!({})),
            vec![
                "El nombre debe ser una cadena de texto",
                "El nombre del Producto es obligatorio",
                "Valor no válido",
                "El precio del Producto es obligatorio",
                "Precio inválido",
            ]
        );
    }

    #[test]
    fn empty_update_body_fails_every_body_rule() {
        let messages = update_messages("1", json!({}));
        assert_eq!(messages.len(), 6);
        assert_eq!(messages[5], "Valor no válido");
    }

    #[test]
    fn zero_price_only_fails_positivity() {
        assert_eq!(
            create_messages(json!({"name": "Monitor", "price": 0})),
            vec!["Precio inválido"]
        );
    }

    #[test]
    fn text_price_fails_numeric_and_positivity() {
        assert_eq!(
            create_messages(json!({"name": "Monitor", "price": "hola"})),
            vec!["Valor no válido", "Precio inválido"]
        );
    }

    #[test]
    fn empty_price_fails_three_rules() {
        let mut body = valid_update();
        body["price"] = json!("");
        assert_eq!(
            update_messages("1", body),
            vec![
                "Valor no válido",
                "El precio del Producto es obligatorio",
                "Precio inválido"
            ]
        );
    }

    #[test]
    fn negative_price_fails_positivity() {
        let mut body = valid_update();
        body["price"] = json!(-2500);
        assert_eq!(update_messages("1", body), vec!["Precio inválido"]);
    }

    #[test]
    fn numeric_name_only_fails_type_check() {
        let mut body = valid_update();
        body["name"] = json!(300);
        assert_eq!(
            update_messages("1", body),
            vec!["El nombre debe ser una cadena de texto"]
        );
    }

    #[test]
    fn empty_name_only_fails_required() {
        let mut body = valid_update();
        body["name"] = json!("");
        assert_eq!(
            update_messages("1", body),
            vec!["El nombre del Producto es obligatorio"]
        );
    }

    #[test]
    fn non_boolean_availability() {
        let mut body = valid_update();
        body["availability"] = json!(300);
        assert_eq!(update_messages("1", body), vec!["Valor no válido"]);
    }

    #[test]
    fn invalid_id_is_reported_with_body_errors() {
        assert_eq!(update_messages("not-valid-url", valid_update()), vec!["ID no válido"]);
        let messages = update_messages("not-valid-url", json!({}));
        assert_eq!(messages.len(), 7);
        assert_eq!(messages[0], "ID no válido");
    }

    #[test]
    fn product_id_parses_integers() {
        assert_eq!(product_id("42").ok(), Some(42));
        let Err(errors) = product_id("not-valid-url") else {
            panic!("expected invalid id");
        };
        assert_eq!(errors.messages(), vec!["ID no válido"]);
    }

    #[test]
    fn accepted_values_are_coerced() -> Result<(), ValidationErrors> {
        let values = new_product(json!({"name": "Mouse", "price": "50.5"}))?;
        assert_eq!(values, ProductValues::new("Mouse".to_string(), 50.5));

        let (id, values) = product_update(
            "3",
            json!({"name": "Mouse", "price": 20, "availability": "false"}),
        )?;
        assert_eq!(id, 3);
        assert!(!values.availability);
        assert!((values.price - 20.0).abs() < f64::EPSILON);
        Ok(())
    }
}
