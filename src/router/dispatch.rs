//! Per-event routing table.

use par_connector_protocol::TabCategory;

use super::{Router, UiEvent};
use crate::tab::{TabId, TabStatus};

impl Router {
    /// Route a UI event for `tab_id` to the handler its category supports.
    ///
    /// Unregistered tabs and event/category pairs with no route are dropped.
    /// Only `follow-up-clicked` has a fallback (chat) for categories it does
    /// not name; `info-link-click` goes to chat regardless of category.
    pub fn dispatch(&mut self, tab_id: &TabId, event: &UiEvent) {
        let Some(category) = self.registry.category_of(tab_id) else {
            log::trace!("Dropping {} for unregistered tab {tab_id}", event.name());
            return;
        };

        let id = tab_id;
        let routed = match event {
            UiEvent::SourceLinkClick { message_id, link } => match category {
                TabCategory::Chat => self.with_chat(|h| h.source_link_click(id, message_id, link)),
                _ => false,
            },
            UiEvent::ResponseBodyLinkClick { message_id, link } => match category {
                TabCategory::Chat => {
                    self.with_chat(|h| h.response_body_link_click(id, message_id, link))
                }
                TabCategory::FeatureDev => {
                    self.with_feature_dev(|h| h.response_body_link_click(id, message_id, link))
                }
                TabCategory::CodeTransform => {
                    self.with_code_transform(|h| h.response_body_link_click(id, message_id, link))
                }
                TabCategory::Unknown => false,
            },
            UiEvent::InfoLinkClick { link } => self.with_chat(|h| h.info_link_click(id, link)),
            UiEvent::FollowUpClicked {
                message_id,
                follow_up,
            } => match category {
                TabCategory::Unknown => {
                    self.with_commons(|h| h.follow_up_clicked(id, message_id, follow_up))
                }
                TabCategory::FeatureDev => {
                    self.with_feature_dev(|h| h.follow_up_clicked(id, message_id, follow_up))
                }
                TabCategory::CodeTransform => {
                    self.with_code_transform(|h| h.follow_up_clicked(id, message_id, follow_up))
                }
                TabCategory::Chat => {
                    self.with_chat(|h| h.follow_up_clicked(id, message_id, follow_up))
                }
            },
            UiEvent::CopyCodeToClipboard(block) => match category {
                TabCategory::Chat => self.with_chat(|h| h.copy_code_to_clipboard(id, block)),
                _ => false,
            },
            UiEvent::CodeInsertToCursor(block) => match category {
                TabCategory::Chat => self.with_chat(|h| h.insert_code_at_cursor(id, block)),
                TabCategory::FeatureDev => self.with_feature_dev(|h| {
                    h.insert_code_at_cursor(id, &block.code, &block.code_reference)
                }),
                _ => false,
            },
            UiEvent::OpenDiff {
                file_path,
                deleted,
                message_id,
            } => match category {
                TabCategory::FeatureDev => {
                    self.with_feature_dev(|h| h.open_diff(id, file_path, *deleted, message_id))
                }
                _ => false,
            },
            UiEvent::FileActionClick {
                message_id,
                file_path,
                action_name,
            } => match category {
                TabCategory::FeatureDev => self.with_feature_dev(|h| {
                    h.file_action_click(id, message_id, file_path, action_name)
                }),
                _ => false,
            },
            UiEvent::ChatItemVoted { message_id, vote } => match category {
                TabCategory::Chat => self.with_chat(|h| h.chat_item_voted(id, message_id, *vote)),
                TabCategory::FeatureDev => {
                    self.with_feature_dev(|h| h.chat_item_voted(id, message_id, *vote))
                }
                _ => false,
            },
            UiEvent::SendFeedback(feedback) => match category {
                TabCategory::Chat => self.with_chat(|h| h.send_feedback(id, feedback)),
                TabCategory::FeatureDev => self.with_feature_dev(|h| h.send_feedback(id, feedback)),
                _ => false,
            },
            UiEvent::StopChatResponse => {
                let routed = match category {
                    TabCategory::Chat => self.with_chat(|h| h.stop_chat_response(id)),
                    TabCategory::FeatureDev => {
                        self.with_feature_dev(|h| h.stop_chat_response(id))
                    }
                    _ => false,
                };
                self.registry.update_status(id, TabStatus::Free);
                routed
            }
            UiEvent::CustomFormAction(action) => match category {
                TabCategory::FeatureDev => {
                    self.with_feature_dev(|h| h.custom_form_action(id, action))
                }
                TabCategory::CodeTransform => {
                    self.with_code_transform(|h| h.custom_form_action(id, action))
                }
                _ => false,
            },
            UiEvent::AuthFollowUpClicked { auth_type } => match category {
                TabCategory::Chat => self.with_chat(|h| h.auth_follow_up_clicked(id, auth_type)),
                TabCategory::FeatureDev => {
                    self.with_feature_dev(|h| h.auth_follow_up_clicked(id, auth_type))
                }
                TabCategory::CodeTransform => {
                    self.with_code_transform(|h| h.auth_follow_up_clicked(id, auth_type))
                }
                TabCategory::Unknown => false,
            },
            UiEvent::KnownTabOpen => match category {
                TabCategory::FeatureDev => self.with_feature_dev(|h| h.tab_opened(id)),
                TabCategory::CodeTransform => self.with_code_transform(|h| h.tab_opened(id)),
                _ => false,
            },
            UiEvent::Transform => match category {
                TabCategory::CodeTransform => self.with_code_transform(|h| h.transform(id)),
                _ => false,
            },
            UiEvent::ClearChat => match category {
                TabCategory::Chat => self.with_chat(|h| h.clear_chat(id)),
                _ => false,
            },
            UiEvent::Help => match category {
                TabCategory::Chat => self.with_chat(|h| h.help(id)),
                _ => false,
            },
        };

        if !routed {
            log::trace!(
                "Dropping {} for tab {tab_id} (category {category})",
                event.name()
            );
        }
    }
}
