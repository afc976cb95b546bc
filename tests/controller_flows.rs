//! End-to-end flows through the controller with scripted worker responses.

use prodtui::catalog::{ApiError, Product, ProductDraft, ProductId};
use prodtui::input::InputAction;
use prodtui::render::protocol::{ApiCommand, ApiResponse, RequestId, WriteKind};
use prodtui::render::ui::{Focus, FormField, LookupPanel, Modal, UiMode, ViewModel};
use prodtui::render::{Effects, ProductController};

fn product(id: &str, name: &str, description: Option<&str>, price: f64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: description.map(str::to_string),
        price,
    }
}

fn single_request(effects: &Effects) -> RequestId {
    assert_eq!(effects.commands.len(), 1, "expected one command: {effects:?}");
    effects.commands[0]
        .request_id()
        .expect("command carries a request id")
}

fn type_text(controller: &mut ProductController, vm: &mut ViewModel, text: &str) {
    for ch in text.chars() {
        controller.process_action(InputAction::Insert(ch), vm);
    }
}

/// Start a session whose first list load returns `products`.
fn started(products: Vec<Product>) -> (ProductController, ViewModel) {
    let mut controller = ProductController::new();
    let mut vm = ViewModel::new("http://localhost:3000", 100, 30);
    let effects = controller.initial_load(&mut vm);
    let request_id = single_request(&effects);
    assert!(matches!(effects.commands[0], ApiCommand::FetchList { .. }));
    assert_eq!(vm.lookup, LookupPanel::Placeholder);

    controller.handle_response(
        ApiResponse::ListLoaded {
            request_id,
            result: Ok(products),
        },
        &mut vm,
    );
    (controller, vm)
}

#[test]
fn create_flow_resets_form_and_refreshes_list() {
    let (mut controller, mut vm) = started(Vec::new());
    assert_eq!(
        vm.list.placeholder.as_deref(),
        Some("Nenhum produto cadastrado ainda.")
    );

    controller.process_action(InputAction::Insert('a'), &mut vm);
    assert_eq!(vm.focus, Focus::Form(FormField::Name));
    type_text(&mut controller, &mut vm, "Widget");
    controller.process_action(InputAction::FocusNext, &mut vm);
    controller.process_action(InputAction::FocusNext, &mut vm);
    type_text(&mut controller, &mut vm, "9.5");

    let effects = controller.process_action(InputAction::Submit, &mut vm);
    let create_id = single_request(&effects);
    assert_eq!(
        effects.commands[0],
        ApiCommand::Create {
            request_id: create_id,
            draft: ProductDraft {
                name: "Widget".to_string(),
                description: String::new(),
                price: 9.5,
            },
        }
    );

    let effects = controller.handle_response(
        ApiResponse::WriteCompleted {
            request_id: create_id,
            kind: WriteKind::Create,
            result: Ok(()),
        },
        &mut vm,
    );
    assert_eq!(vm.add_form.name, "");
    assert_eq!(vm.add_form.price, "");
    let list_id = single_request(&effects);

    controller.handle_response(
        ApiResponse::ListLoaded {
            request_id: list_id,
            result: Ok(vec![product("1", "Widget", Some(""), 9.5)]),
        },
        &mut vm,
    );
    assert!(vm.list.placeholder.is_none());
    assert_eq!(vm.list.products.len(), 1);
}

#[test]
fn invalid_input_alerts_without_a_request() {
    let (mut controller, mut vm) = started(Vec::new());
    controller.process_action(InputAction::FocusNext, &mut vm);
    type_text(&mut controller, &mut vm, "Widget");
    controller.process_action(InputAction::FocusNext, &mut vm);
    controller.process_action(InputAction::FocusNext, &mut vm);
    type_text(&mut controller, &mut vm, "-1");

    let effects = controller.process_action(InputAction::Submit, &mut vm);
    assert!(effects.commands.is_empty());
    assert_eq!(
        vm.modal,
        Some(Modal::Alert("O preço não pode ser negativo.".to_string()))
    );

    // Enter dismisses; the typed values are kept for correction.
    controller.process_action(InputAction::Submit, &mut vm);
    assert!(vm.modal.is_none());
    assert_eq!(vm.add_form.name, "Widget");
}

#[test]
fn update_flow_returns_to_add_mode() {
    let (mut controller, mut vm) = started(vec![
        product("1", "Widget", None, 9.5),
        product("2", "Lamp", Some("Desk lamp"), 12.0),
    ]);

    controller.process_action(InputAction::Insert('j'), &mut vm);
    controller.process_action(InputAction::Insert('u'), &mut vm);
    assert_eq!(vm.mode, UiMode::Update);
    assert_eq!(vm.lookup, LookupPanel::Blank);
    assert_eq!(vm.update_form.id, Some(ProductId::new("2")));
    assert_eq!(vm.update_form.description, "Desk lamp");
    assert_eq!(vm.update_form.price, "12");

    controller.process_action(InputAction::FocusNext, &mut vm);
    controller.process_action(InputAction::FocusNext, &mut vm);
    controller.process_action(InputAction::DeleteBackward, &mut vm);
    type_text(&mut controller, &mut vm, "5");

    let effects = controller.process_action(InputAction::Submit, &mut vm);
    let update_id = single_request(&effects);
    match &effects.commands[0] {
        ApiCommand::Update { id, draft, .. } => {
            assert_eq!(id, &ProductId::new("2"));
            assert_eq!(draft.price, 15.0);
            assert_eq!(draft.name, "Lamp");
        }
        other => panic!("unexpected command {other:?}"),
    }

    let effects = controller.handle_response(
        ApiResponse::WriteCompleted {
            request_id: update_id,
            kind: WriteKind::Update,
            result: Ok(()),
        },
        &mut vm,
    );
    assert_eq!(vm.mode, UiMode::Add);
    assert_eq!(vm.update_form.id, None);
    assert_eq!(vm.lookup, LookupPanel::Placeholder);
    assert!(matches!(
        effects.commands[..],
        [ApiCommand::FetchList { .. }]
    ));
}

#[test]
fn failed_update_keeps_update_mode() {
    let (mut controller, mut vm) = started(vec![product("1", "Widget", None, 9.5)]);
    controller.process_action(InputAction::Submit, &mut vm);
    let effects = controller.process_action(InputAction::Submit, &mut vm);
    let update_id = single_request(&effects);

    let effects = controller.handle_response(
        ApiResponse::WriteCompleted {
            request_id: update_id,
            kind: WriteKind::Update,
            result: Err(ApiError::Transport("connection reset".to_string())),
        },
        &mut vm,
    );
    assert!(effects.commands.is_empty());
    assert_eq!(vm.mode, UiMode::Update);
    assert_eq!(
        vm.modal,
        Some(Modal::Alert("Erro de comunicação com o servidor.".to_string()))
    );
}

#[test]
fn cancel_update_discards_edits() {
    let (mut controller, mut vm) = started(vec![product("1", "Widget", None, 9.5)]);
    controller.process_action(InputAction::Insert('u'), &mut vm);
    type_text(&mut controller, &mut vm, "XYZ");

    let effects = controller.process_action(InputAction::Cancel, &mut vm);
    assert!(effects.commands.is_empty());
    assert_eq!(vm.mode, UiMode::Add);
    assert_eq!(vm.update_form.name, "");
    assert_eq!(vm.lookup, LookupPanel::Placeholder);
}

#[test]
fn delete_requires_confirmation() {
    let (mut controller, mut vm) = started(vec![product("1", "Widget", None, 9.5)]);

    controller.process_action(InputAction::Insert('d'), &mut vm);
    assert_eq!(
        vm.modal.as_ref().map(Modal::message).as_deref(),
        Some("Tem certeza que deseja deletar o produto \"Widget\"?")
    );
    let effects = controller.process_action(InputAction::Insert('n'), &mut vm);
    assert!(effects.commands.is_empty());
    assert!(vm.modal.is_none());

    controller.process_action(InputAction::Insert('d'), &mut vm);
    let effects = controller.process_action(InputAction::Insert('y'), &mut vm);
    let delete_id = single_request(&effects);
    assert_eq!(
        effects.commands[0],
        ApiCommand::Delete {
            request_id: delete_id,
            id: ProductId::new("1"),
        }
    );

    let effects = controller.handle_response(
        ApiResponse::WriteCompleted {
            request_id: delete_id,
            kind: WriteKind::Delete,
            result: Err(ApiError::Status {
                code: 409,
                status_text: "Conflict".to_string(),
                message: "Produto em uso".to_string(),
            }),
        },
        &mut vm,
    );
    assert!(effects.commands.is_empty());
    assert_eq!(
        vm.modal,
        Some(Modal::Alert(
            "Falha ao deletar produto: Produto em uso".to_string()
        ))
    );
}

#[test]
fn lookup_cancels_update_and_shows_details() {
    let (mut controller, mut vm) = started(vec![product("3", "Lamp", None, 12.0)]);
    controller.process_action(InputAction::Insert('u'), &mut vm);
    assert_eq!(vm.mode, UiMode::Update);

    vm.focus = Focus::Search;
    type_text(&mut controller, &mut vm, " 3 ");
    let effects = controller.process_action(InputAction::Submit, &mut vm);
    let lookup_id = single_request(&effects);
    assert_eq!(vm.mode, UiMode::Add);
    assert_eq!(vm.lookup, LookupPanel::Searching);

    controller.handle_response(
        ApiResponse::LookupCompleted {
            request_id: lookup_id,
            id: ProductId::new("3"),
            result: Ok(vec![product("3", "Lamp", None, 12.0)]),
        },
        &mut vm,
    );
    assert_eq!(vm.lookup.title(), "Detalhes do Produto ID: 3");
    let text: Vec<String> = vm.lookup.lines().into_iter().map(|(_, l)| l).collect();
    assert_eq!(
        text,
        vec!["Nome: Lamp", "Descrição: Não informada", "Preço: $12.00"]
    );
}

#[test]
fn lookup_outcomes() {
    let (mut controller, mut vm) = started(Vec::new());
    vm.focus = Focus::Search;

    let effects = controller.process_action(InputAction::Submit, &mut vm);
    assert!(effects.commands.is_empty());
    assert_eq!(
        vm.modal,
        Some(Modal::Alert("Por favor, digite um ID para buscar.".to_string()))
    );
    controller.process_action(InputAction::Submit, &mut vm);

    type_text(&mut controller, &mut vm, "7");
    let effects = controller.process_action(InputAction::Submit, &mut vm);
    controller.handle_response(
        ApiResponse::LookupCompleted {
            request_id: single_request(&effects),
            id: ProductId::new("7"),
            result: Ok(Vec::new()),
        },
        &mut vm,
    );
    assert_eq!(vm.lookup, LookupPanel::NotFound(ProductId::new("7")));

    let effects = controller.process_action(InputAction::Submit, &mut vm);
    controller.handle_response(
        ApiResponse::LookupCompleted {
            request_id: single_request(&effects),
            id: ProductId::new("7"),
            result: Err(ApiError::Decode("expected value".to_string())),
        },
        &mut vm,
    );
    assert_eq!(vm.lookup, LookupPanel::CommunicationError);
}

#[test]
fn superseded_list_response_is_dropped() {
    let (mut controller, mut vm) = started(vec![product("1", "Widget", None, 9.5)]);

    let first = single_request(&controller.process_action(InputAction::Insert('r'), &mut vm));
    let second = single_request(&controller.process_action(InputAction::Insert('r'), &mut vm));
    assert!(second > first);

    controller.handle_response(
        ApiResponse::ListLoaded {
            request_id: first,
            result: Ok(Vec::new()),
        },
        &mut vm,
    );
    assert_eq!(vm.list.products.len(), 1);

    controller.handle_response(
        ApiResponse::ListLoaded {
            request_id: second,
            result: Err(ApiError::Status {
                code: 500,
                status_text: "Internal Server Error".to_string(),
                message: "Internal Server Error".to_string(),
            }),
        },
        &mut vm,
    );
    assert!(vm.list.products.is_empty());
    assert_eq!(
        vm.list.placeholder.as_deref(),
        Some("Falha ao carregar produtos.")
    );
}
