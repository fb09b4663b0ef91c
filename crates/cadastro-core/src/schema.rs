//! Entity schemas for the registry services.
//!
//! The medicos and pacientes APIs are the same CRUD surface over different
//! field sets, so both are expressed as instances of [`EntitySchema`]: a
//! static description of the table, its fields, which of them are required
//! at creation and which are restricted to the two gender codes. All
//! validation and patch building is driven from that description.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Accepted values for an enumerated gender field (besides null).
pub const GENDER_CODES: &[&str] = &["M", "F"];

/// One column of an entity table, as seen by validation.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Column and JSON key name
    pub name: &'static str,
    /// Must be present and non-empty on create
    pub required: bool,
    /// Restricted to [`GENDER_CODES`] or null
    pub enumerated: bool,
}

/// Static description of one registry entity.
#[derive(Debug)]
pub struct EntitySchema {
    /// SQLite table name
    pub table: &'static str,
    /// URL path segment (`/medicos`, `/pacientes`)
    pub resource: &'static str,
    /// Label used in caller-facing messages ("Médico", "Paciente")
    pub label: &'static str,
    /// Full field set, in table column order. Doubles as the update
    /// allow-list: only these names ever reach a SQL statement.
    pub fields: &'static [FieldSpec],
}

/// Professional registry schema.
pub static MEDICOS: EntitySchema = EntitySchema {
    table: "medicos",
    resource: "medicos",
    label: "Médico",
    fields: &[
        FieldSpec { name: "nome", required: true, enumerated: false },
        FieldSpec { name: "crm", required: false, enumerated: false },
        FieldSpec { name: "especialidade", required: true, enumerated: false },
        FieldSpec { name: "horario", required: true, enumerated: false },
        FieldSpec { name: "genero", required: false, enumerated: true },
    ],
};

/// Patient registry schema.
pub static PACIENTES: EntitySchema = EntitySchema {
    table: "pacientes",
    resource: "pacientes",
    label: "Paciente",
    fields: &[
        FieldSpec { name: "nome", required: true, enumerated: false },
        FieldSpec { name: "cpf", required: true, enumerated: false },
        FieldSpec { name: "data_nascimento", required: true, enumerated: false },
        FieldSpec { name: "telefone", required: true, enumerated: false },
        FieldSpec { name: "genero", required: true, enumerated: true },
    ],
};

impl EntitySchema {
    /// Idempotent table DDL.
    ///
    /// Enumerated columns are left nullable even when required at creation:
    /// the two-code constraint belongs to validation, and updates may clear
    /// the value to null.
    pub fn create_table_sql(&self) -> String {
        let mut columns = vec!["id INTEGER PRIMARY KEY AUTOINCREMENT".to_string()];
        for field in self.fields {
            if field.required && !field.enumerated {
                columns.push(format!("{} TEXT NOT NULL", field.name));
            } else {
                columns.push(format!("{} TEXT", field.name));
            }
        }
        format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            self.table,
            columns.join(", ")
        )
    }

    /// Validate a create request body and return values in field order.
    ///
    /// Checks run in order: required fields present and non-empty (one
    /// aggregated message), then the gender code if a value was supplied.
    /// Nothing is written when any check fails.
    pub fn create_row(&self, body: &Map<String, Value>) -> Result<Vec<Option<String>>> {
        let missing = self.fields.iter().filter(|f| f.required).any(|f| {
            match body.get(f.name) {
                Some(Value::String(s)) => s.is_empty(),
                None | Some(Value::Null) => true,
                Some(_) => false,
            }
        });
        if missing {
            return Err(Error::Validation(self.required_fields_message()));
        }

        let mut row = Vec::with_capacity(self.fields.len());
        for field in self.fields {
            let value = body.get(field.name).unwrap_or(&Value::Null);
            if field.enumerated && !value.is_null() && !is_gender_code(value) {
                return Err(Error::validation(format!(
                    "Campo '{}' deve ser 'M' ou 'F'",
                    field.name
                )));
            }
            row.push(text_value(field.name, value)?);
        }
        Ok(row)
    }

    /// Build a partial-update patch from a request body.
    ///
    /// Iterates the fixed allow-list and picks up only the fields present
    /// in the body; unknown keys are ignored. An enumerated field may be
    /// set to either code or cleared to null. An empty resulting patch is
    /// rejected rather than turned into a vacuous UPDATE.
    pub fn update_patch(
        &self,
        body: &Map<String, Value>,
    ) -> Result<Vec<(&'static str, Option<String>)>> {
        let mut patch = Vec::new();
        for field in self.fields {
            if let Some(value) = body.get(field.name) {
                if field.enumerated && !value.is_null() && !is_gender_code(value) {
                    return Err(Error::validation(format!(
                        "Campo '{}' deve ser 'M', 'F' ou nulo",
                        field.name
                    )));
                }
                patch.push((field.name, text_value(field.name, value)?));
            }
        }
        if patch.is_empty() {
            return Err(Error::validation(
                "Nenhum campo válido para atualizar fornecido",
            ));
        }
        Ok(patch)
    }

    /// Aggregated message naming every required field.
    pub fn required_fields_message(&self) -> String {
        let names: Vec<String> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| format!("'{}'", f.name))
            .collect();
        let listed = if let Some((last, head)) = names.split_last() {
            if head.is_empty() {
                last.clone()
            } else {
                format!("{} e {}", head.join(", "), last)
            }
        } else {
            String::new()
        };
        format!("Campos {listed} são obrigatórios")
    }

    pub fn not_found_message(&self) -> String {
        format!("{} não encontrado", self.label)
    }

    pub fn created_message(&self) -> String {
        format!("{} adicionado com sucesso!", self.label)
    }

    pub fn updated_message(&self) -> String {
        format!("{} atualizado com sucesso!", self.label)
    }

    pub fn deleted_message(&self) -> String {
        format!("{} removido com sucesso!", self.label)
    }
}

fn is_gender_code(value: &Value) -> bool {
    matches!(value.as_str(), Some(code) if GENDER_CODES.contains(&code))
}

/// Extract a TEXT column value from a JSON field.
///
/// All columns are TEXT, so anything other than a string or null is
/// rejected instead of being silently coerced.
fn text_value(name: &str, value: &Value) -> Result<Option<String>> {
    match value {
        Value::String(s) => Ok(Some(s.clone())),
        Value::Null => Ok(None),
        _ => Err(Error::validation(format!("Campo '{name}' deve ser texto"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().expect("test body must be an object").clone()
    }

    #[test]
    fn test_create_row_in_field_order() {
        let row = PACIENTES
            .create_row(&body(json!({
                "telefone": "999",
                "nome": "Ana",
                "cpf": "123",
                "genero": "F",
                "data_nascimento": "1990-01-01",
            })))
            .unwrap();

        assert_eq!(
            row,
            vec![
                Some("Ana".to_string()),
                Some("123".to_string()),
                Some("1990-01-01".to_string()),
                Some("999".to_string()),
                Some("F".to_string()),
            ]
        );
    }

    #[test]
    fn test_create_missing_required_field() {
        let err = PACIENTES
            .create_row(&body(json!({
                "nome": "Ana",
                "cpf": "123",
                "data_nascimento": "1990-01-01",
                "genero": "F",
            })))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Campos 'nome', 'cpf', 'data_nascimento', 'telefone' e 'genero' são obrigatórios"
        );
    }

    #[test]
    fn test_create_empty_string_counts_as_missing() {
        let err = MEDICOS
            .create_row(&body(json!({
                "nome": "",
                "especialidade": "Cardiologia",
                "horario": "08:00-12:00",
            })))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Campos 'nome', 'especialidade' e 'horario' são obrigatórios"
        );
    }

    #[test]
    fn test_create_optional_fields_default_to_null() {
        let row = MEDICOS
            .create_row(&body(json!({
                "nome": "Dra. Lia",
                "especialidade": "Pediatria",
                "horario": "13:00-17:00",
            })))
            .unwrap();

        // crm and genero absent -> stored as NULL
        assert_eq!(row[1], None);
        assert_eq!(row[4], None);
    }

    #[test]
    fn test_create_rejects_bad_gender() {
        let err = MEDICOS
            .create_row(&body(json!({
                "nome": "Dra. Lia",
                "especialidade": "Pediatria",
                "horario": "13:00-17:00",
                "genero": "X",
            })))
            .unwrap_err();

        assert_eq!(err.to_string(), "Campo 'genero' deve ser 'M' ou 'F'");
    }

    #[test]
    fn test_create_rejects_non_text_value() {
        let err = PACIENTES
            .create_row(&body(json!({
                "nome": "Ana",
                "cpf": 123,
                "data_nascimento": "1990-01-01",
                "telefone": "999",
                "genero": "F",
            })))
            .unwrap_err();

        assert_eq!(err.to_string(), "Campo 'cpf' deve ser texto");
    }

    #[test]
    fn test_patch_keeps_allow_list_order_and_skips_unknown() {
        let patch = PACIENTES
            .update_patch(&body(json!({
                "telefone": "888",
                "nome": "Ana Maria",
                "endereco": "ignored",
            })))
            .unwrap();

        assert_eq!(
            patch,
            vec![
                ("nome", Some("Ana Maria".to_string())),
                ("telefone", Some("888".to_string())),
            ]
        );
    }

    #[test]
    fn test_patch_allows_clearing_gender() {
        let patch = PACIENTES
            .update_patch(&body(json!({ "genero": null })))
            .unwrap();

        assert_eq!(patch, vec![("genero", None)]);
    }

    #[test]
    fn test_patch_rejects_bad_gender() {
        let err = PACIENTES
            .update_patch(&body(json!({ "genero": "X" })))
            .unwrap_err();

        assert_eq!(err.to_string(), "Campo 'genero' deve ser 'M', 'F' ou nulo");
    }

    #[test]
    fn test_patch_with_only_unknown_fields() {
        let err = PACIENTES
            .update_patch(&body(json!({ "endereco": "Rua 1" })))
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Nenhum campo válido para atualizar fornecido"
        );
    }

    #[test]
    fn test_create_table_sql_constraints() {
        let sql = PACIENTES.create_table_sql();

        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS pacientes"));
        assert!(sql.contains("id INTEGER PRIMARY KEY AUTOINCREMENT"));
        assert!(sql.contains("cpf TEXT NOT NULL"));
        // required at creation, but clearable to null on update
        assert!(sql.contains("genero TEXT,") || sql.ends_with("genero TEXT)"));
    }
}
