// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Opening messages of an analysis session.

use crate::artifact::Artifact;
use crate::llm::ChatMessage;

const SYSTEM_PROMPT: &str = "\
You turn artifact files into a project tree. Each artifact is plain text that \
contains one or more files. Use the provided tools to create, update and read \
files below the project root, one artifact at a time; later artifacts build on \
the files earlier ones produced.

A file's name appears alone on a comment line directly above its content. Take \
file names only from such lines, never from anywhere else. Paths are relative \
to the project root.";

const WORKED_EXAMPLE: &str = "\
Example. An artifact named '3_landing_page.txt' contains:

    <!-- index.html -->
    <!doctype html>
    <html>
      <head><link rel=\"stylesheet\" href=\"style.css\"></head>
      <body><h1>Welcome</h1></body>
    </html>

    /* style.css */
    <!-- keep the existing rules -->
    h1 { color: teal; }

It names two files, index.html and style.css, each followed by its content. \
Rules:
1. A file-name comment holds the name and nothing else. A comment with more \
text is not a file name. When an artifact names no file, do nothing.
2. When an artifact says to keep or extend existing content, as style.css does \
above, read the current file first and write back the merged result.
3. An artifact that only sketches a directory layout produces no files.";

/// System prompt, worked example and the artifact itself.
#[must_use]
pub fn conversation(artifact: &Artifact) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(WORKED_EXAMPLE),
        ChatMessage::user(format!(
            "Decide which files to create or update for the artifact named {}. \
             Its content follows.\n\n{}",
            artifact.name, artifact.content
        )),
    ]
}
