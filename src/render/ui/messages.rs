//! User-facing text.

use crate::catalog::ProductId;

pub const NO_DESCRIPTION: &str = "Sem descrição detalhada.";
pub const DESCRIPTION_NOT_PROVIDED: &str = "Não informada";

pub const LIST_EMPTY: &str = "Nenhum produto cadastrado ainda.";
pub const LIST_LOAD_FAILED: &str = "Falha ao carregar produtos.";
pub const LIST_LOAD_ERROR: &str = "Erro ao carregar produtos. Tente novamente mais tarde.";

pub const LOOKUP_PLACEHOLDER: &str = "Detalhes do produto aparecerão aqui após a busca.";
pub const LOOKUP_SEARCHING: &str = "Buscando...";
pub const LOOKUP_EMPTY_ID: &str = "Por favor, digite um ID para buscar.";
pub const LOOKUP_COMMUNICATION_ERROR: &str = "Falha na comunicação ao buscar o produto.";

pub const CREATE_COMMUNICATION_ERROR: &str =
    "Erro de comunicação com o servidor ao tentar adicionar.";
pub const UPDATE_COMMUNICATION_ERROR: &str = "Erro de comunicação com o servidor.";
pub const DELETE_COMMUNICATION_ERROR: &str =
    "Erro de comunicação com o servidor ao tentar deletar.";

pub fn lookup_not_found(id: &ProductId) -> String {
    format!("Produto com ID {id} não encontrado.")
}

pub fn lookup_failed(id: &ProductId, code: u16, status_text: &str) -> String {
    format!("Erro ao buscar produto (ID: {id}): {code} - {status_text}")
}

pub fn confirm_delete(name: &str) -> String {
    format!("Tem certeza que deseja deletar o produto \"{name}\"?")
}

pub fn create_failed(message: &str) -> String {
    format!("Falha ao adicionar produto: {message}")
}

pub fn update_failed(message: &str) -> String {
    format!("Falha ao atualizar produto: {message}")
}

pub fn delete_failed(message: &str) -> String {
    format!("Falha ao deletar produto: {message}")
}
