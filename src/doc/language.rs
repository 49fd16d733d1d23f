/*!
# The HL Language

HL programs are sequences of statements separated by `;`. A missing
`;` on the last statement is tolerated. All values are integers; there
are no strings, arrays, or functions.

Assign and print:

<pre><code>&nbsp;> a = 1; b = 2; c = a + b; print c;
&nbsp;  3
</code></pre>

Expressions use the operators `+ - * / % & >>`, comparisons
`== != < <= > >=` (yielding 1 or 0), prefix and postfix `++`, unary
`-`, parentheses, and assignment `=` (lowest precedence, usable inside
a larger expression).

Labels and `goto` build loops. A label is a name followed by `:`; it
may be referenced before its definition appears.

<pre><code>&nbsp;> i = 0; top: i = i + 1; if (i < 3) goto top; print i;
&nbsp;  3
</code></pre>

Structured conditionals use braces, with an optional `else`:

<pre><code>&nbsp;> a = 5; if (a > 3) { print 1; } else { print 0; }
&nbsp;  1
</code></pre>

`time;` prints the seconds elapsed since the current run started:

<pre><code>&nbsp;> time;
&nbsp;  time: 0.000[sec]
</code></pre>

In an interactive session every statement executes as soon as it is
entered, and variables and labels stay visible to later statements.
The commands `run <file>`, `clear`, and `exit` belong to the terminal,
not the language. Stop a runaway program with CTRL-C.
*/
