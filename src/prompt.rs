//! Prompt templates for the content generator.
//!
//! The post prompt pins the JSON shape that [`Post::from_model_response`]
//! expects and the line budgets that keep the rendered image readable.
//!
//! [`Post::from_model_response`]: crate::post::Post::from_model_response

use crate::post::Post;

/// Prompt asking for one post in `category`, answered as a JSON object.
pub fn post_prompt(category: &str) -> String {
    format!(
        r#"Context:
    We are an IT company with a page on Instagram. We publish posts in several
    sub-categories of the category below:
    Category: {category}

Task:
    Generate an Instagram post on a random topic (junior to intermediate level)
    for one of those sub-categories. Don't repeat an already used topic.

    Respond in a JSON format like this:
    {{
        "title": "Your catchy title. Maximum 1 line with 50 characters (including spaces).",
        "description": "A clear engaging explanation of the topic. 10-20 lines.",
        "code": "Optional short code block of 5-10 lines or empty string. Don't include more than 60 characters per line here including spaces."
    }}

Additional details:
    - Use only one paragraph and bullets if needed in description.
    - Don't use more than 5 lines for one paragraph.
    - Represent bullet by *.
    - Don't use emojis.
    - Sum of lines used by description and code should be 15-20 lines strictly.
    - Also add empty line in code after end of block of code like classes, functions or loops.
    - Don't write incomplete code like comments only.

STRICTLY USE BULLETS AND PARAGRAPHS IN DIFFERENT LINES.
Recheck and correct if errors and mistakes."#
    )
}

/// Prompt asking for a short caption for an already generated post.
pub fn caption_prompt(post: &Post) -> String {
    format!(
        r#"Generate a short caption for this Instagram post.
Title: {title}
Description: {description}

The caption should also invite readers to contact our profile for python
programming, website development, graphic designing, data science, database
management, cloud computing and more. Readers should DM for inquiries. Help
with assignments and tutoring is also available.
The content should be placed properly in lines.
Add at least 10 hashtags."#,
        title = post.title,
        description = post.description,
    )
}
