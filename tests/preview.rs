use pretty_assertions::assert_eq;
use preview::{Block, List, ListItem, Span, format_inline, plain_text, segment};

fn text(s: &str) -> Span {
    Span::Text(s.to_string())
}

/// How many source lines the blocks account for. Fence lines are counted
/// from the input since a code block does not record them.
fn accounted_lines(input: &str, blocks: &[Block]) -> usize {
    let fences = input
        .split('\n')
        .filter(|line| line.starts_with("```"))
        .count();
    let content: usize = blocks
        .iter()
        .map(|block| match block {
            Block::CodeBlock { lines, .. } => lines.len(),
            Block::List(list) => list.items.len(),
            _ => 1,
        })
        .sum();
    content + fences
}

const GUIDE: &str = "# Deploying to AWS

## Prerequisites

- An AWS account
- The `aws` CLI, configured with `aws configure`
* Docker 20.10+

## Steps

1. Build the image:
```bash
docker build -t my-app .
# tag it
- not a list item
```
2. Push it to ECR
3. Open the [ECS console](https://console.aws.amazon.com/ecs) and create a service

---

**Note:** costs apply. See [pricing](https://aws.amazon.com/pricing) for details.
##### Appendix
";

#[test]
fn every_line_is_accounted_for() {
    let inputs = [
        "",
        "\n",
        "plain",
        GUIDE,
        "```\nunterminated\n# still code",
        "- a\n* b\n1. c\n\n\n---\n   \n#x\n# y",
        "\u{0}\u{7}`**[](\n\t\r\n```\n```",
        "```\n```\n```",
    ];

    for input in inputs {
        let blocks = segment(input);
        let expected = if input.is_empty() {
            0
        } else {
            input.split('\n').count()
        };
        assert_eq!(accounted_lines(input, &blocks), expected, "input: {input:?}");
    }
}

#[test]
fn deployment_guide_structure() {
    let blocks = segment(GUIDE);

    assert_eq!(
        blocks[0],
        Block::Heading {
            level: 1,
            content: vec![text("Deploying to AWS")],
        }
    );
    assert_eq!(blocks[1], Block::Spacer);
    assert_eq!(blocks[3], Block::Spacer);
    assert_eq!(
        blocks[4],
        Block::List(List {
            ordered: false,
            items: vec![
                ListItem {
                    content: vec![text("An AWS account")],
                },
                ListItem {
                    content: vec![
                        text("The "),
                        Span::Code("aws".to_string()),
                        text(" CLI, configured with "),
                        Span::Code("aws configure".to_string()),
                    ],
                },
                ListItem {
                    content: vec![text("Docker 20.10+")],
                },
            ],
        })
    );

    // The fence interrupts the numbered run
    assert_eq!(
        blocks[8],
        Block::List(List {
            ordered: true,
            items: vec![ListItem {
                content: vec![text("Build the image:")],
            }],
        })
    );
    assert_eq!(
        blocks[9],
        Block::CodeBlock {
            language: "bash".to_string(),
            lines: vec![
                "docker build -t my-app .".to_string(),
                "# tag it".to_string(),
                "- not a list item".to_string(),
            ],
        }
    );
    assert_eq!(
        blocks[10],
        Block::List(List {
            ordered: true,
            items: vec![
                ListItem {
                    content: vec![text("Push it to ECR")],
                },
                ListItem {
                    content: vec![
                        text("Open the "),
                        Span::Link {
                            text: "ECS console".to_string(),
                            url: "https://console.aws.amazon.com/ecs".to_string(),
                        },
                        text(" and create a service"),
                    ],
                },
            ],
        })
    );
    assert_eq!(blocks[12], Block::Rule);
    assert_eq!(
        blocks[14],
        Block::Paragraph {
            content: vec![
                Span::Bold("Note:".to_string()),
                text(" costs apply. See "),
                Span::Link {
                    text: "pricing".to_string(),
                    url: "https://aws.amazon.com/pricing".to_string(),
                },
                text(" for details."),
            ],
        }
    );
    assert_eq!(
        blocks[15],
        Block::Paragraph {
            content: vec![text("##### Appendix")],
        }
    );
    assert_eq!(blocks[16], Block::Spacer);
    assert_eq!(blocks.len(), 17);
}

#[test]
fn code_block_lines_are_verbatim() {
    let body = ["  indented **not bold**", "", "\ttab [x](y)", "## nope"];
    let input = format!("```\n{}\n```", body.join("\n"));
    assert_eq!(
        segment(&input),
        vec![Block::CodeBlock {
            language: String::new(),
            lines: body.iter().map(|line| line.to_string()).collect(),
        }]
    );
}

#[test]
fn implicit_fence_closure() {
    assert_eq!(
        segment("```js\nconst x = 1;"),
        vec![Block::CodeBlock {
            language: "js".to_string(),
            lines: vec!["const x = 1;".to_string()],
        }]
    );
}

#[test]
fn heading_boundary() {
    assert!(matches!(
        segment("##### too deep").as_slice(),
        [Block::Paragraph { .. }]
    ));
    assert!(matches!(
        segment("#### ok").as_slice(),
        [Block::Heading { level: 4, .. }]
    ));
    assert!(matches!(
        segment("#no space").as_slice(),
        [Block::Paragraph { .. }]
    ));
}

#[test]
fn list_run_grouping() {
    let blocks = segment("- a\n- b\n\n- c");
    assert!(matches!(
        blocks.as_slice(),
        [
            Block::List(List { ordered: false, .. }),
            Block::Spacer,
            Block::List(List { ordered: false, .. }),
        ]
    ));
}

#[test]
fn backtick_disables_link_parsing() {
    assert_eq!(
        format_inline("see `code` and [text](url)"),
        vec![
            text("see "),
            Span::Code("code".to_string()),
            text(" and [text](url)"),
        ]
    );
}

#[test]
fn bold_and_unterminated_bold() {
    assert_eq!(
        format_inline("**bold** and plain"),
        vec![Span::Bold("bold".to_string()), text(" and plain")]
    );
    assert_eq!(plain_text(&format_inline("**oops")), "**oops");
}

#[test]
fn unpaired_backtick_is_code() {
    assert_eq!(
        format_inline("a `b"),
        vec![text("a "), Span::Code("b".to_string())]
    );
}

#[test]
fn code_block_keeps_carriage_returns() {
    assert_eq!(
        segment("```sh\r\necho hi\r\n```\r\nafter\r"),
        vec![
            Block::CodeBlock {
                language: "sh".to_string(),
                lines: vec!["echo hi\r".to_string()],
            },
            Block::Paragraph {
                content: vec![text("after")],
            },
        ]
    );
}

#[test]
fn rule_versus_paragraph() {
    assert_eq!(segment("---"), vec![Block::Rule]);
    assert_eq!(segment("  ---\t"), vec![Block::Rule]);
    assert!(matches!(
        segment("--- text").as_slice(),
        [Block::Paragraph { .. }]
    ));
}

#[test]
fn visible_text_survives_formatting() {
    // Only delimiters that formed spans disappear from the visible text
    for line in ["plain", "x ** y", "[t](u", "**", "[](x)", "[a] (b)"] {
        assert_eq!(plain_text(&format_inline(line)), line, "line: {line:?}");
    }
}

#[test]
fn renders_pdf_and_svg() {
    let pdf = preview::markdown_to_pdf(GUIDE).unwrap();
    assert!(pdf.starts_with(b"%PDF"));

    let svg = preview::markdown_to_svg(GUIDE).unwrap();
    assert!(!svg.pages.is_empty());
    assert!(svg.pages[0].contains("<svg"));
    assert!(svg.width_pt > 0.0 && svg.height_pt > 0.0);
}
