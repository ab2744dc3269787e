use crate::web::models::Message;

/// How many of the caller's most recent turns are forwarded to the model.
pub const HISTORY_WINDOW: usize = 10;

pub const SYSTEM_PROMPT: &str = "Ти - розумний помічник інтернет-магазину вітамінів та БАДів в Україні.

ВАЖЛИВІ ПРАВИЛА:
1. Ти НЕ є медичним працівником і НЕ надаєш медичні консультації
2. Завжди рекомендуй проконсультуватися з лікарем перед прийомом будь-яких добавок
3. Відповідай ввічливо, дружньо та професійно
4. Якщо не знаєш відповіді - чесно скажи про це
5. Використовуй інформацію з бази даних товарів для рекомендацій
6. Можеш спілкуватися українською та російською мовами

ТВОЇ ФУНКЦІЇ:
- Відповідати на питання про товари (склад, ціна, наявність)
- Рекомендувати товари на основі потреб користувача
- Допомагати з навігацією по сайту
- Відповідати на загальні питання про добавки

ДИСКЛЕЙМЕР (додавай при необхідності):
\"⚠️ Ця інформація не є медичною рекомендацією. Перед прийомом будь-яких добавок обов'язково проконсультуйтеся з лікарем.\"

Якщо користувач запитує про конкретні товари або просить рекомендації - використовуй контекст з бази даних.";

/// Builds the message list sent to the completion model:
/// instruction, catalog context, recent history, then the new user message.
///
/// History is forwarded untouched; role order is not checked.
pub fn assemble(
    system_prompt: &str,
    products_context: &str,
    history: &[Message],
    user_message: &str,
) -> Vec<Message> {
    let recent = &history[history.len().saturating_sub(HISTORY_WINDOW)..];

    let mut messages = Vec::with_capacity(recent.len() + 3);
    messages.push(Message::system(system_prompt));
    messages.push(Message::system(products_context));
    messages.extend_from_slice(recent);
    messages.push(Message::user(user_message));
    messages
}
