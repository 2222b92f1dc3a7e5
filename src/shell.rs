use anyhow::{bail, Result};

/// Hook script for `eval "$(promptline init zsh)"`.
///
/// preexec stamps the start time; precmd hands the exit status and elapsed
/// seconds to one `promptline prompt` call, which prints the transient line
/// itself and both sides on stdout. An empty command line never reaches
/// preexec, so it reports nothing.
///
/// PROMPT and RPROMPT only name the variables holding the rendered text.
/// With `prompt_subst` on, zsh expands them once and does not re-scan the
/// result, so `$(..)` or backticks in a branch name stay literal.
pub fn init_script(shell: &str, binary: &str) -> Result<String> {
    match shell {
        "zsh" => Ok(ZSH_INIT.replace("{binary}", &quote(binary))),
        other => bail!("unsupported shell: {} (supported: zsh)", other),
    }
}

/// Single-quote for zsh.
fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

const ZSH_INIT: &str = r#"zmodload zsh/datetime
autoload -Uz add-zsh-hook
setopt prompt_subst

_promptline_preexec() {
  _promptline_start=$EPOCHSECONDS
}

_promptline_precmd() {
  local exit_code=$?
  local -a args
  args=(--dirstack ${#dirstack})
  if [[ -n $_promptline_start ]]; then
    args+=(--status $exit_code --duration $(( EPOCHSECONDS - _promptline_start )))
    unset _promptline_start
  fi
  local -a out
  out=("${(@f)$({binary} prompt $args)}")
  _promptline_left=$out[1]
  _promptline_right=$out[2]
}

PROMPT='${_promptline_left}'
RPROMPT='${_promptline_right}'

add-zsh-hook preexec _promptline_preexec
add-zsh-hook precmd _promptline_precmd
"#;
