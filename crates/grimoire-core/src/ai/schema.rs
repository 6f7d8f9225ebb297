//! Response schemas in the service's OpenAPI subset

use serde_json::{json, Value};

/// `{name, description, manaCost?, origin?}[]`
pub fn skill_list_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": {
                    "type": "STRING",
                    "description": "O nome exato do poder de Tormenta 20."
                },
                "description": {
                    "type": "STRING",
                    "description": "A descrição resumida do poder, conforme o livro de regras."
                },
                "manaCost": {
                    "type": "STRING",
                    "description": "O custo em Pontos de Mana (PM) do poder. Ex: '2 PM', 'Variável', etc. Opcional.",
                    "nullable": true
                },
                "origin": {
                    "type": "STRING",
                    "description": "A origem do poder, como o nome da classe, raça ou divindade. Ex: 'Guerreiro', 'Elfo', 'Wynna'. Opcional.",
                    "nullable": true
                }
            },
            "required": ["name", "description"]
        }
    })
}

/// `{name, description}[]`
pub fn scenario_list_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "name": {
                    "type": "STRING",
                    "description": "O nome curto e direto para o cenário (ex: 'Ações de Ataque')."
                },
                "description": {
                    "type": "STRING",
                    "description": "Uma frase descritiva sobre o propósito do cenário."
                }
            },
            "required": ["name", "description"]
        }
    })
}
