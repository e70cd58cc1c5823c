//! # Bladepost Convert - Blade to SparkPost template conversion
//!
//! `bladepost-convert` rewrites Blade template syntax into SparkPost
//! merge-tag syntax. It is a one-way, purely syntactic transpiler: it does
//! not evaluate expressions or render output, it translates markup so that a
//! SparkPost-side renderer can take over.
//!
//! ## What gets converted
//!
//! | Blade | SparkPost |
//! |-------|-----------|
//! | `{{ $user->name }}` | `{{user.name}}` |
//! | `{!! $body !!}` | `{{{body}}}` |
//! | `{{-- note --}}` | `{{!-- note --}}` |
//! | `@foreach($items as $item) ... @endforeach` | `{{#each items}} ... {{/each}}` |
//! | `@if($cond) ... @else ... @endif` | `{{#if cond}} ... {{else}} ... {{/if}}` |
//! | `@unless($cond) ... @endunless` | `{{#unless cond}} ... {{/unless}}` |
//! | `config('mail.from.address')` | `MAIL_FROM_ADDRESS` |
//!
//! Inside a loop body the item binding becomes the `this` scope
//! (`$item->name` → `this.name`) and the implicit `$loop` accessors become
//! `@index`, `@first`, and `@last`.
//!
//! ## Quick Start
//!
//! ```rust
//! use bladepost_convert::convert;
//!
//! let blade = "@if($user->isAdmin)Hello {{ $user->name }}@endif";
//! assert_eq!(
//!     convert(blade),
//!     "{{#if user.isAdmin}}Hello {{user.name}}{{/if}}"
//! );
//! ```
//!
//! ## Guarantees and limits
//!
//! [`convert`] is total: it never fails, and input with no Blade markup
//! (including the empty string) passes through byte-for-byte. Already
//! converted SparkPost tags are left alone, so conversion is idempotent on
//! its own output. A `@foreach` with no matching `@endforeach` degrades
//! safely: the loop pass stops and leaves the malformed region as-is while
//! the other passes still run.
//!
//! What SparkPost cannot express is dropped rather than guessed at: method
//! calls and computed array indices truncate the access chain
//! (`$date->format('Y-m-d')` → `date`), `??`/ternary defaults reduce to the
//! tested variable, and compound boolean conditions are rewritten
//! best-effort (variables only, operators verbatim).

mod comments;
mod conditionals;
mod echoes;
mod expr;
mod loops;
mod scope;

/// Converts a Blade template body to SparkPost merge-tag syntax.
///
/// # Example
///
/// ```rust
/// let blade = "<p>{{ $greeting ?? 'Hello' }} {{ $user->name }}</p>";
/// assert_eq!(
///     bladepost_convert::convert(blade),
///     "<p>{{greeting}} {{user.name}}</p>"
/// );
/// ```
pub fn convert(template: &str) -> String {
    // Order matters:
    // 1. Comments first, so later passes never touch comment interiors.
    // 2. Foreach next, so loop variables ($item->, $loop->) are renamed
    //    before the generic expression rewriting in the echo passes.
    // 3. Conditionals before echoes, so condition text is not mistaken for
    //    an echo.
    // 4. Raw echoes and regular echoes last.
    let content = comments::convert_comments(template);
    let content = loops::convert_loops(&content);
    let content = conditionals::convert_conditionals(&content);
    let content = echoes::convert_raw_echoes(&content);
    echoes::convert_echoes(&content)
}
