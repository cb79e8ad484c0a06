//! Twilight component builders for the control model and the jump modal.

use twilight_model::channel::message::component::{
    ActionRow, Button, ButtonStyle, Component, SelectMenu, SelectMenuOption, SelectMenuType,
    TextInput, TextInputStyle,
};

use super::controls::{Control, ControlRow, ControlStyle, SelectOption};
use super::jump::JumpModal;

/// Convert control rows into message action rows.
pub fn build_action_rows(rows: &[ControlRow]) -> Vec<Component> {
    rows.iter()
        .filter(|row| !row.is_empty())
        .map(|row| {
            Component::ActionRow(ActionRow {
                id: None,
                components: row.iter().map(build_component).collect(),
            })
        })
        .collect()
}

/// Single text-input row for the jump modal.
#[allow(deprecated)]
pub fn build_modal_components(modal: &JumpModal) -> Vec<Component> {
    let page_input = Component::TextInput(TextInput {
        id: None,
        custom_id: modal.input_id.clone(),
        label: Some(modal.input_label.clone()),
        max_length: Some(modal.max_length),
        min_length: Some(1),
        placeholder: Some(modal.placeholder.clone()),
        required: Some(true),
        style: TextInputStyle::Short,
        value: None,
    });

    vec![Component::ActionRow(ActionRow {
        id: None,
        components: vec![page_input],
    })]
}

fn build_component(control: &Control) -> Component {
    match control {
        Control::Button {
            custom_id,
            label,
            style,
            disabled,
        } => Component::Button(Button {
            id: None,
            custom_id: Some(custom_id.clone()),
            disabled: *disabled,
            emoji: None,
            label: Some(label.clone()),
            style: button_style(*style),
            url: None,
            sku_id: None,
        }),
        Control::Select {
            custom_id,
            placeholder,
            options,
            disabled,
        } => Component::SelectMenu(SelectMenu {
            id: None,
            channel_types: None,
            custom_id: custom_id.clone(),
            default_values: None,
            disabled: *disabled,
            kind: SelectMenuType::Text,
            max_values: Some(1),
            min_values: Some(1),
            options: Some(options.iter().map(select_option).collect()),
            placeholder: Some(placeholder.clone()),
            required: None,
        }),
    }
}

fn select_option(option: &SelectOption) -> SelectMenuOption {
    SelectMenuOption {
        default: option.default,
        description: None,
        emoji: None,
        label: option.label.clone(),
        value: option.value.clone(),
    }
}

fn button_style(style: ControlStyle) -> ButtonStyle {
    match style {
        ControlStyle::Primary => ButtonStyle::Primary,
        ControlStyle::Secondary => ButtonStyle::Secondary,
        ControlStyle::Success => ButtonStyle::Success,
        ControlStyle::Danger => ButtonStyle::Danger,
    }
}
